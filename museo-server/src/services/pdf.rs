//! PDF ticket generation
//!
//! Renders an A5 admission ticket for a reservation using the PDF
//! built-in Helvetica faces.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::db::models::{EventWithRoom, Reservation};
use crate::utils::{AppError, AppResult};

const PAGE_WIDTH_MM: f32 = 148.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MARGIN_MM: f32 = 18.0;

const SEPARATOR: &str = "------------------------------------------------";

/// Render the admission ticket for a reservation as PDF bytes
pub fn ticket_pdf(
    reservation: &Reservation,
    event: &EventWithRoom,
    museum_name: &str,
) -> AppResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Admission Ticket",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "ticket",
    );

    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::internal(format!("Failed to load PDF font: {}", e)))?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::internal(format!("Failed to load PDF font: {}", e)))?;
    let footer_font = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| AppError::internal(format!("Failed to load PDF font: {}", e)))?;

    let layer = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT_MM - 25.0;
    let x = MARGIN_MM;

    // Header
    layer.use_text(museum_name, 18.0, Mm(x), Mm(y), &title_font);
    y -= 8.0;
    layer.use_text("Admission Ticket", 10.0, Mm(x), Mm(y), &footer_font);
    y -= 10.0;
    layer.use_text(SEPARATOR, 10.0, Mm(x), Mm(y), &body_font);
    y -= 12.0;

    // Event information
    layer.use_text(
        format!("Event: {}", event.name),
        12.0,
        Mm(x),
        Mm(y),
        &title_font,
    );
    y -= 8.0;
    layer.use_text(
        format!("Date: {}", event.start_date.format("%d/%m/%Y")),
        12.0,
        Mm(x),
        Mm(y),
        &body_font,
    );
    y -= 8.0;
    if let Some(start_time) = event.start_time {
        layer.use_text(
            format!("Time: {}", start_time.format("%H:%M")),
            12.0,
            Mm(x),
            Mm(y),
            &body_font,
        );
        y -= 8.0;
    }
    let room_name = event.room_name.as_deref().unwrap_or("TBD");
    layer.use_text(format!("Room: {}", room_name), 12.0, Mm(x), Mm(y), &body_font);
    y -= 14.0;

    // Reservation information
    layer.use_text(
        format!("Holder: {}", reservation.customer_name),
        12.0,
        Mm(x),
        Mm(y),
        &body_font,
    );
    y -= 8.0;
    layer.use_text(
        format!("ID document: {}", reservation.id_document),
        12.0,
        Mm(x),
        Mm(y),
        &body_font,
    );
    y -= 8.0;
    layer.use_text(
        format!("Tickets: {}", reservation.ticket_count),
        12.0,
        Mm(x),
        Mm(y),
        &body_font,
    );
    y -= 8.0;
    layer.use_text(
        format!("Total paid: S/ {:.2}", reservation.total),
        12.0,
        Mm(x),
        Mm(y),
        &title_font,
    );
    y -= 12.0;
    layer.use_text(SEPARATOR, 10.0, Mm(x), Mm(y), &body_font);
    y -= 12.0;

    // Footer
    let code = reservation
        .id
        .as_ref()
        .map(|id| id.key().to_string())
        .unwrap_or_default();
    layer.use_text(
        format!("Reservation code: #{}", code),
        10.0,
        Mm(x),
        Mm(y),
        &footer_font,
    );
    y -= 6.0;
    layer.use_text(
        "Please present this ticket at the entrance.",
        10.0,
        Mm(x),
        Mm(y),
        &footer_font,
    );

    doc.save_to_bytes()
        .map_err(|e| AppError::internal(format!("Failed to render PDF: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample() -> (Reservation, EventWithRoom) {
        let event = EventWithRoom {
            id: Some("event:expo1".parse().unwrap()),
            name: "Royal Tombs Gala".to_string(),
            description: None,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            end_date: None,
            start_time: NaiveTime::from_hms_opt(19, 30, 0),
            end_time: None,
            event_type: Some("gala".to_string()),
            ticket_price: 55.0,
            room: None,
            room_name: Some("Gold Hall".to_string()),
        };
        let reservation = Reservation {
            id: Some("reservation:r1".parse().unwrap()),
            customer_name: "Juan Perez".to_string(),
            id_document: "12345678".to_string(),
            phone: Some("987654321".to_string()),
            ticket_count: 2,
            total: 110.0,
            payment_method: Some("cash".to_string()),
            receipt_type: Some("receipt".to_string()),
            event: "event:expo1".parse().unwrap(),
            reserved_at: 0,
        };
        (reservation, event)
    }

    #[test]
    fn test_ticket_pdf_is_generated() {
        let (reservation, event) = sample();
        let bytes = ticket_pdf(&reservation, &event, "Museo Tumbas Reales")
            .expect("PDF generation failed");

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_ticket_pdf_without_room_or_time() {
        let (reservation, mut event) = sample();
        event.room_name = None;
        event.start_time = None;

        let bytes = ticket_pdf(&reservation, &event, "Museo Tumbas Reales")
            .expect("PDF generation failed");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
