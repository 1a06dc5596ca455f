use crate::database::models::Venue;
use crate::database::Database;
use crate::geo::BoundingBox;
use anyhow::Result;
use rusqlite::{params, Row};

fn venue_from_row(row: &Row) -> rusqlite::Result<Venue> {
    let types_json: String = row.get(3)?;
    Ok(Venue {
        place_id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        types: serde_json::from_str(&types_json).unwrap_or_default(),
        latitude: row.get(4)?,
        longitude: row.get(5)?,
    })
}

impl Database {
    /// Upsert a cached venue, ignoring duplicates by place_id
    pub fn upsert_venue(&self, venue: &Venue) -> Result<()> {
        let types_json = serde_json::to_string(&venue.types)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO venues (place_id, name, address, types, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                venue.place_id,
                venue.name,
                venue.address,
                types_json,
                venue.latitude,
                venue.longitude
            ],
        )?;
        Ok(())
    }

    /// Cached venues inside a bounding box (coarse prune; callers apply the
    /// true distance filter)
    pub fn get_venues_in_bbox(&self, bbox: &BoundingBox) -> Result<Vec<Venue>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT place_id, name, address, types, latitude, longitude
             FROM venues
             WHERE latitude BETWEEN ?1 AND ?2 AND longitude BETWEEN ?3 AND ?4",
        )?;
        let rows = stmt.query_map(
            params![bbox.min_lat, bbox.max_lat, bbox.min_lng, bbox.max_lng],
            venue_from_row,
        )?;

        let mut venues = Vec::new();
        for venue in rows {
            venues.push(venue?);
        }
        Ok(venues)
    }

    /// Total cached venues
    pub fn count_venues(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM venues", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_venue(place_id: &str, lat: f64, lng: f64) -> Venue {
        Venue {
            place_id: place_id.to_string(),
            name: "Cafe X".to_string(),
            address: "1 Main St".to_string(),
            types: vec!["cafe".to_string()],
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn test_upsert_same_place_id_keeps_one_row() {
        let db = Database::open_in_memory().unwrap();
        let venue = sample_venue("place-1", 52.52, 13.405);

        db.upsert_venue(&venue).unwrap();
        db.upsert_venue(&venue).unwrap();

        assert_eq!(db.count_venues().unwrap(), 1);
    }

    #[test]
    fn test_bbox_query_filters_coarsely() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_venue(&sample_venue("near", 52.52, 13.405)).unwrap();
        db.upsert_venue(&sample_venue("far", 48.85, 2.35)).unwrap();

        let bbox = BoundingBox::around(52.52, 13.405, 500.0);
        let venues = db.get_venues_in_bbox(&bbox).unwrap();

        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].place_id, "near");
        assert_eq!(venues[0].types, vec!["cafe".to_string()]);
    }
}
