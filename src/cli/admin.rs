// Maintenance commands: catalogues, role grants and account access

use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::AdminCoordinator;
use crate::types::internal::context::RequestContext;

pub async fn add_amenity(
    app_data: Arc<AppData>,
    name: &str,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("add_amenity");
    let coordinator = AdminCoordinator::new(app_data);

    let amenity = coordinator.add_amenity(&ctx, name, description).await?;
    println!("Amenity '{}' added with id {}.", amenity.name, amenity.amenity_id);
    Ok(())
}

pub async fn add_flat(
    app_data: Arc<AppData>,
    flat_number: &str,
    wing: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("add_flat");
    let coordinator = AdminCoordinator::new(app_data);

    let flat = coordinator.add_flat(&ctx, flat_number, wing).await?;
    println!("Flat '{}' added with id {}.", flat.flat_number, flat.flat_id);
    Ok(())
}

pub async fn add_parking(app_data: Arc<AppData>, slot_number: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("add_parking");
    let coordinator = AdminCoordinator::new(app_data);

    let parking = coordinator.add_parking(&ctx, slot_number).await?;
    println!("Parking slot '{}' added with id {}.", parking.slot_number, parking.parking_id);
    Ok(())
}

pub async fn grant_role(app_data: Arc<AppData>, username: &str, role: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("grant_role");
    let coordinator = AdminCoordinator::new(app_data);

    if coordinator.grant_role(&ctx, username, role).await? {
        println!("Granted {} to {}.", role, username);
    } else {
        println!("{} already has {}.", username, role);
    }
    Ok(())
}

pub async fn revoke_role(app_data: Arc<AppData>, username: &str, role: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("revoke_role");
    let coordinator = AdminCoordinator::new(app_data);

    if coordinator.revoke_role(&ctx, username, role).await? {
        println!("Revoked {} from {}.", role, username);
    } else {
        println!("{} does not have {}.", username, role);
    }
    Ok(())
}

pub async fn set_authorised(
    app_data: Arc<AppData>,
    username: &str,
    is_authorised: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let command = if is_authorised { "enable" } else { "disable" };
    let ctx = RequestContext::for_cli(command);
    let coordinator = AdminCoordinator::new(app_data);

    coordinator.set_authorised(&ctx, username, is_authorised).await?;
    println!("{} {}d.", username, command);
    Ok(())
}
