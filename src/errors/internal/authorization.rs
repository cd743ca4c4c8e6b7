use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Authentication required")]
    MissingPrincipal,

    #[error("Role required: {role}")]
    RoleRequired { role: String },
}
