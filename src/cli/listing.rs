//! Building/floor/room listing commands

use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{Building, Floor, Room, VenueApi};
use crate::error::Result;
use crate::output::{json, table};

/// Building for table display
#[derive(Tabled)]
struct BuildingDisplay {
    #[tabled(rename = "BUILDING ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "LOCATION")]
    location: String,
}

impl From<Building> for BuildingDisplay {
    fn from(b: Building) -> Self {
        let location = match (b.latitude, b.longitude) {
            (Some(lat), Some(lon)) => format!("{:.5}, {:.5}", lat, lon),
            _ => "-".to_string(),
        };
        Self {
            id: b.id,
            name: b.name,
            location,
        }
    }
}

/// Floor for table display
#[derive(Tabled)]
struct FloorDisplay {
    #[tabled(rename = "FLOOR ID")]
    id: String,
    #[tabled(rename = "BUILDING")]
    building_id: String,
    #[tabled(rename = "LEVEL")]
    level: i32,
    #[tabled(rename = "NAME")]
    name: String,
}

impl From<Floor> for FloorDisplay {
    fn from(f: Floor) -> Self {
        Self {
            id: f.id,
            building_id: f.building_id,
            level: f.level,
            name: f.name.unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Room for table display
#[derive(Tabled)]
struct RoomDisplay {
    #[tabled(rename = "ROOM ID")]
    id: String,
    #[tabled(rename = "FLOOR")]
    floor_id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CAPACITY")]
    capacity: String,
    #[tabled(rename = "BOOKABLE")]
    bookable: String,
}

impl From<Room> for RoomDisplay {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            floor_id: r.floor_id,
            name: r.name,
            capacity: r.capacity.map_or_else(|| "-".to_string(), |c| c.to_string()),
            bookable: match r.bookable {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
        }
    }
}

/// Run the building list command
pub async fn buildings(ctx: &CommandContext, format: OutputFormat) -> Result<()> {
    let buildings = ctx.client.list_buildings().await?;
    print_listing(buildings, BuildingDisplay::from, format)
}

/// Run the floor list command
pub async fn floors(
    ctx: &CommandContext,
    building: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let floors = match building {
        Some(building_id) => ctx.client.list_floors_of_building(building_id).await?,
        None => ctx.client.list_floors().await?,
    };
    print_listing(floors, FloorDisplay::from, format)
}

/// Run the room list command
pub async fn rooms(ctx: &CommandContext, floor: Option<&str>, format: OutputFormat) -> Result<()> {
    let rooms = match floor {
        Some(floor_id) => ctx.client.list_rooms_of_floor(floor_id).await?,
        None => ctx.client.list_rooms().await?,
    };
    print_listing(rooms, RoomDisplay::from, format)
}

fn print_listing<T, D>(items: Vec<T>, to_display: impl Fn(T) -> D, format: OutputFormat) -> Result<()>
where
    T: serde::Serialize,
    D: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<D> = items.into_iter().map(to_display).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&items)?);
        }
    }
    Ok(())
}
