//! Fixed-layout PDF rendering for sales notes.
//!
//! Letter-size pages with a header block (title, folio, issue date), a
//! customer block, a line-item table in input order, a rule, the total,
//! and a footer caption. Output is deterministic for a given document:
//! the issue date comes from the note, not the clock.

use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb};

use salenote_catalog::Customer;
use salenote_core::types::Timestamp;

/// Everything the renderer needs to produce the document.
#[derive(Debug, Clone)]
pub struct NoteDocument {
    pub folio: String,
    pub issued_at: Timestamp,
    pub customer: Customer,
    pub lines: Vec<DocumentLine>,
    pub total: f64,
}

/// One row of the line-item table.
#[derive(Debug, Clone)]
pub struct DocumentLine {
    pub quantity: i32,
    pub product_name: String,
    pub unit_price: f64,
    pub amount: f64,
}

/// Errors from document assembly. Callers must discard any partial output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}

// Longer product names are cut rather than wrapped.
const MAX_PRODUCT_CHARS: usize = 48;

/// Render a sales note to PDF bytes.
pub fn render(document: &NoteDocument) -> Result<Vec<u8>, RenderError> {
    // Letter page, millimetres.
    let page_width = Mm(215.9);
    let page_height = Mm(279.4);

    let (doc, first_page, first_layer) =
        PdfDocument::new("Nota de venta", page_width, page_height, "content");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    // -- Header block --
    layer.use_text("NOTA DE VENTA", 20.0, Mm(72.0), Mm(255.0), &bold);
    layer.use_text(
        format!("Folio: {}", document.folio),
        12.0,
        Mm(145.0),
        Mm(243.0),
        &regular,
    );
    layer.use_text(
        format!("Fecha: {}", document.issued_at.format("%d/%m/%Y")),
        12.0,
        Mm(145.0),
        Mm(237.0),
        &regular,
    );

    // -- Customer block --
    let customer = &document.customer;
    layer.use_text("Información del Cliente", 14.0, Mm(15.0), Mm(226.0), &bold);
    let customer_fields = [
        format!("Razón Social: {}", customer.legal_name),
        format!("Nombre Comercial: {}", customer.trade_name),
        format!("RFC: {}", customer.tax_id),
        format!("Correo Electrónico: {}", customer.email),
        format!("Teléfono: {}", customer.phone),
    ];
    let mut y = 219.0;
    for field in customer_fields {
        layer.use_text(field, 10.0, Mm(15.0), Mm(y), &regular);
        y -= 5.0;
    }

    // -- Line-item table --
    layer.use_text("Contenido de la Nota", 14.0, Mm(15.0), Mm(186.0), &bold);

    layer.use_text("Cantidad", 10.0, Mm(18.0), Mm(178.0), &bold);
    layer.use_text("Producto", 10.0, Mm(53.0), Mm(178.0), &bold);
    layer.use_text("Precio Unit.", 10.0, Mm(124.0), Mm(178.0), &bold);
    layer.use_text("Importe", 10.0, Mm(159.0), Mm(178.0), &bold);
    draw_rule(&layer, Mm(176.0));

    y = 170.0;
    for line in &document.lines {
        // Out of room: continue the table on a fresh page.
        if y < 30.0 {
            let (page, page_layer) = doc.add_page(page_width, page_height, "content");
            layer = doc.get_page(page).get_layer(page_layer);
            y = 260.0;
        }

        let name: String = line.product_name.chars().take(MAX_PRODUCT_CHARS).collect();
        layer.use_text(line.quantity.to_string(), 10.0, Mm(18.0), Mm(y), &regular);
        layer.use_text(name, 10.0, Mm(53.0), Mm(y), &regular);
        layer.use_text(money(line.unit_price), 10.0, Mm(124.0), Mm(y), &regular);
        layer.use_text(money(line.amount), 10.0, Mm(159.0), Mm(y), &regular);
        y -= 7.0;
    }

    // -- Total --
    draw_rule(&layer, Mm(y + 3.0));
    y -= 7.0;
    layer.use_text(
        format!("Total: {}", money(document.total)),
        12.0,
        Mm(159.0),
        Mm(y),
        &bold,
    );

    // -- Footer --
    layer.use_text("Gracias por su preferencia", 8.0, Mm(90.0), Mm(12.0), &regular);

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Horizontal rule across the table width.
fn draw_rule(layer: &PdfLayerReference, y: Mm) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(15.0), y), false),
            (Point::new(Mm(200.0), y), false),
        ],
        is_closed: false,
    });
}

fn money(value: f64) -> String {
    format!("${value:.2}")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_document(line_count: usize) -> NoteDocument {
        let lines = (0..line_count)
            .map(|i| DocumentLine {
                quantity: 2,
                product_name: format!("Producto {i}"),
                unit_price: 10.0,
                amount: 20.0,
            })
            .collect();

        NoteDocument {
            folio: "NV-1700000000123".to_string(),
            issued_at: chrono::Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            customer: Customer {
                id: "cust-1".to_string(),
                legal_name: "Comercial del Norte SA de CV".to_string(),
                trade_name: "Comercial del Norte".to_string(),
                tax_id: "CNO850101XYZ".to_string(),
                email: "compras@cnorte.example".to_string(),
                phone: "+52 81 0000 0000".to_string(),
            },
            lines,
            total: 20.0 * line_count as f64,
        }
    }

    #[test]
    fn renders_pdf_bytes() {
        let bytes = render(&sample_document(2)).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn long_item_lists_flow_onto_further_pages() {
        let bytes = render(&sample_document(80)).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_line_list_still_renders() {
        // A note read back from a partially-written creation can have no items.
        let bytes = render(&sample_document(0)).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
