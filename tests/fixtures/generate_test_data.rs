// ==========================================
// Test data generator
// ==========================================
// Purpose: synthetic buildings/roads around one storage point
// Output: tests/fixtures/datasets/*
// ==========================================

use csv::Writer;
use serde_json::json;
use std::error::Error;
use std::f64::consts::PI;
use std::fs::{self, File};

const OUT_DIR: &str = "tests/fixtures/datasets";

// Storage used by every dataset (EPSG:32633)
const STORAGE_X: f64 = 204012.0;
const STORAGE_Y: f64 = 6627962.0;
const STORAGE_NEQ_KG: f64 = 12920.0;

const CSV_HEADER: &[&str] = &["id", "name", "category_code", "x", "y"];

// Building category codes cycled through the rings
const CATEGORY_CODES: &[&str] = &["111", "121", "211", "311", "412", "511", "613", "719", "823", "999"];

#[derive(Clone)]
struct BuildingRecord {
    id: String,
    name: String,
    category_code: String,
    x: String,
    y: String,
}

impl BuildingRecord {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category_code.clone(),
            self.x.clone(),
            self.y.clone(),
        ]
    }
}

/// Building at `distance` meters and `bearing` radians from the storage
fn building_at(index: usize, distance: f64, bearing: f64) -> BuildingRecord {
    BuildingRecord {
        id: format!("B{:05}", index),
        name: if index % 3 == 0 { format!("Bygg {}", index) } else { String::new() },
        category_code: CATEGORY_CODES[index % CATEGORY_CODES.len()].to_string(),
        x: format!("{:.2}", STORAGE_X + distance * bearing.cos()),
        y: format!("{:.2}", STORAGE_Y + distance * bearing.sin()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Generating test datasets...");

    fs::create_dir_all(OUT_DIR)?;

    generate_request()?;
    generate_buildings_rings()?;
    generate_buildings_edge_cases()?;
    generate_roads()?;

    println!("All test datasets generated");
    Ok(())
}

fn generate_request() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/request.json", OUT_DIR);
    let request = json!({
        "x": STORAGE_X,
        "y": STORAGE_Y,
        "neq_kg": STORAGE_NEQ_KG,
        "crs": "EPSG:32633",
    });
    fs::write(&path, serde_json::to_string_pretty(&request)?)?;
    println!("- request.json (NEQ {} kg)", STORAGE_NEQ_KG);
    Ok(())
}

fn generate_buildings_rings() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/01_buildings_rings.csv", OUT_DIR);
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(CSV_HEADER)?;

    // 12 buildings per ring, rings straddling the 347/521/1042 m zones
    let rings = [100.0, 300.0, 500.0, 700.0, 1000.0, 1500.0, 3000.0];
    let mut index = 0;
    for distance in rings {
        for step in 0..12 {
            let bearing = step as f64 * PI / 6.0;
            wtr.write_record(&building_at(index, distance, bearing).to_row())?;
            index += 1;
        }
    }

    wtr.flush()?;
    println!("- 01_buildings_rings.csv ({} rows)", index);
    Ok(())
}

fn generate_buildings_edge_cases() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/02_buildings_edge_cases.csv", OUT_DIR);
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(CSV_HEADER)?;

    // Control rows
    for i in 0..3 {
        wtr.write_record(&building_at(90000 + i, 200.0, i as f64).to_row())?;
    }

    // Missing coordinates
    let mut record = building_at(90010, 200.0, 0.5);
    record.x = String::new();
    wtr.write_record(&record.to_row())?;

    // Empty id
    let mut record = building_at(90011, 200.0, 1.5);
    record.id = String::new();
    wtr.write_record(&record.to_row())?;

    // Same id twice, the closer one should win
    let mut far = building_at(90020, 400.0, 2.0);
    let mut near = building_at(90021, 150.0, 2.0);
    far.id = "DUP".to_string();
    near.id = "DUP".to_string();
    wtr.write_record(&far.to_row())?;
    wtr.write_record(&near.to_row())?;

    // Name with separators that the export must sanitize
    let mut record = building_at(90030, 250.0, 3.0);
    record.name = "Skole, Nordre del".to_string();
    wtr.write_record(&record.to_row())?;

    // Exactly at the storage point
    let mut record = building_at(90040, 0.0, 0.0);
    record.id = "CENTER".to_string();
    wtr.write_record(&record.to_row())?;

    wtr.flush()?;
    println!("- 02_buildings_edge_cases.csv (9 rows)");
    Ok(())
}

fn generate_roads() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/03_roads.json", OUT_DIR);

    let roads = json!([
        {
            "id": "RV7-1",
            "name": "Rv7",
            "coordinates": [[STORAGE_X - 2000.0, STORAGE_Y + 200.0], [STORAGE_X + 2000.0, STORAGE_Y + 200.0]],
            "aadt_year": 2023,
            "aadt_total": 4200,
            "aadt_basis": "Beregnet",
            "speed_limit_kmh": 80
        },
        {
            "id": "FV287-3",
            "coordinates": [[STORAGE_X + 600.0, STORAGE_Y - 2000.0], [STORAGE_X + 600.0, STORAGE_Y + 2000.0]],
            "aadt_year": 2022,
            "aadt_total": 850,
            "speed_limit_kmh": 60
        },
        {
            "id": "KV-FAR",
            "coordinates": [[STORAGE_X + 5000.0, STORAGE_Y], [STORAGE_X + 5200.0, STORAGE_Y + 100.0]]
        }
    ]);

    fs::write(&path, serde_json::to_string_pretty(&roads)?)?;
    println!("- 03_roads.json (3 roads)");
    Ok(())
}
