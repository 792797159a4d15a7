//! Excel report generation
//!
//! Builds XLSX workbooks in memory for the export endpoints. One sheet per
//! report, headers in row 0, autofitted columns.

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::db::models::{EventWithRoom, InventoryProduct, Room};
use crate::utils::{AppError, AppResult};

fn record_id_cell(id: &Option<surrealdb::RecordId>) -> String {
    id.as_ref().map(|i| i.to_string()).unwrap_or_default()
}

/// Workbook listing all events
pub fn events_report(events: &[EventWithRoom]) -> AppResult<Vec<u8>> {
    build_events_workbook(events)
        .map_err(|e| AppError::internal(format!("Failed to build events workbook: {}", e)))
}

fn build_events_workbook(events: &[EventWithRoom]) -> Result<Vec<u8>, XlsxError> {
    const HEADERS: [&str; 5] = ["ID", "Name", "Start Date", "Ticket Price", "Room"];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Events")?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (idx, event) in events.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, record_id_cell(&event.id))?;
        sheet.write_string(row, 1, event.name.as_str())?;
        sheet.write_string(row, 2, event.start_date.to_string())?;
        sheet.write_number(row, 3, event.ticket_price)?;
        sheet.write_string(row, 4, event.room_name.as_deref().unwrap_or(""))?;
    }

    sheet.autofit();
    workbook.save_to_buffer()
}

/// Workbook listing all rooms
pub fn rooms_report(rooms: &[Room]) -> AppResult<Vec<u8>> {
    build_rooms_workbook(rooms)
        .map_err(|e| AppError::internal(format!("Failed to build rooms workbook: {}", e)))
}

fn build_rooms_workbook(rooms: &[Room]) -> Result<Vec<u8>, XlsxError> {
    const HEADERS: [&str; 5] = ["ID", "Name", "Capacity", "Location", "Description"];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Rooms")?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (idx, room) in rooms.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, record_id_cell(&room.id))?;
        sheet.write_string(row, 1, room.name.as_str())?;
        sheet.write_number(row, 2, room.capacity as f64)?;
        sheet.write_string(row, 3, room.location.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 4, room.description.as_deref().unwrap_or(""))?;
    }

    sheet.autofit();
    workbook.save_to_buffer()
}

/// Workbook listing the inventory
pub fn inventory_report(products: &[InventoryProduct]) -> AppResult<Vec<u8>> {
    build_inventory_workbook(products)
        .map_err(|e| AppError::internal(format!("Failed to build inventory workbook: {}", e)))
}

fn build_inventory_workbook(products: &[InventoryProduct]) -> Result<Vec<u8>, XlsxError> {
    const HEADERS: [&str; 5] = ["ID", "Name", "Category", "Total Stock", "Available Stock"];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Inventory")?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (idx, product) in products.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, record_id_cell(&product.id))?;
        sheet.write_string(row, 1, product.name.as_str())?;
        sheet.write_string(row, 2, product.category.as_deref().unwrap_or(""))?;
        sheet.write_number(row, 3, product.stock_total as f64)?;
        sheet.write_number(row, 4, product.stock_available as f64)?;
    }

    sheet.autofit();
    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn sample_event() -> EventWithRoom {
        EventWithRoom {
            id: Some("event:expo1".parse().unwrap()),
            name: "Night at the Museum".to_string(),
            description: None,
            start_date: NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(),
            end_date: None,
            start_time: None,
            end_time: None,
            event_type: Some("exhibition".to_string()),
            ticket_price: 42.50,
            room: None,
            room_name: Some("Children's Hall".to_string()),
        }
    }

    #[test]
    fn test_events_report_content() {
        let bytes = events_report(&[sample_event()]).expect("workbook generation failed");

        let mut workbook = Xlsx::new(Cursor::new(bytes)).expect("not a valid xlsx");
        let range = workbook.worksheet_range("Events").expect("missing sheet");

        assert_eq!(range.get_value((0, 0)), Some(&Data::String("ID".into())));
        assert_eq!(range.get_value((0, 1)), Some(&Data::String("Name".into())));
        assert_eq!(
            range.get_value((0, 2)),
            Some(&Data::String("Start Date".into()))
        );
        assert_eq!(
            range.get_value((0, 3)),
            Some(&Data::String("Ticket Price".into()))
        );
        assert_eq!(range.get_value((0, 4)), Some(&Data::String("Room".into())));

        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("event:expo1".into()))
        );
        assert_eq!(
            range.get_value((1, 1)),
            Some(&Data::String("Night at the Museum".into()))
        );
        assert_eq!(
            range.get_value((1, 2)),
            Some(&Data::String("2025-10-27".into()))
        );
        assert_eq!(range.get_value((1, 3)), Some(&Data::Float(42.5)));
        assert_eq!(
            range.get_value((1, 4)),
            Some(&Data::String("Children's Hall".into()))
        );
    }

    #[test]
    fn test_inventory_report_content() {
        let product = InventoryProduct {
            id: Some("inventory_product:chairs".parse().unwrap()),
            name: "Plastic Chair".to_string(),
            category: Some("Furniture".to_string()),
            stock_total: 120,
            stock_available: 80,
        };

        let bytes = inventory_report(&[product]).expect("workbook generation failed");

        let mut workbook = Xlsx::new(Cursor::new(bytes)).expect("not a valid xlsx");
        let range = workbook.worksheet_range("Inventory").expect("missing sheet");

        assert_eq!(
            range.get_value((1, 1)),
            Some(&Data::String("Plastic Chair".into()))
        );
        assert_eq!(range.get_value((1, 3)), Some(&Data::Float(120.0)));
        assert_eq!(range.get_value((1, 4)), Some(&Data::Float(80.0)));
    }

    #[test]
    fn test_rooms_report_handles_missing_fields() {
        let room = Room {
            id: Some("room:main".parse().unwrap()),
            name: "Main Hall".to_string(),
            capacity: 200,
            location: None,
            description: None,
            image_url: None,
        };

        let bytes = rooms_report(&[room]).expect("workbook generation failed");

        let mut workbook = Xlsx::new(Cursor::new(bytes)).expect("not a valid xlsx");
        let range = workbook.worksheet_range("Rooms").expect("missing sheet");

        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("room:main".into()))
        );
        assert_eq!(
            range.get_value((1, 1)),
            Some(&Data::String("Main Hall".into()))
        );
        assert_eq!(range.get_value((1, 2)), Some(&Data::Float(200.0)));
    }
}
