pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_society_schema;
mod m20250301_000002_seed_roles;
mod m20250315_000003_create_residences;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_society_schema::Migration),
            Box::new(m20250301_000002_seed_roles::Migration),
            Box::new(m20250315_000003_create_residences::Migration),
        ]
    }
}
