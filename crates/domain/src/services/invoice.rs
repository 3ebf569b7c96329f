//! PDF invoice generation for approved credit purchases.
//!
//! Produces a single-page A4 document with a fixed layout: page border,
//! header block, billed-to and invoice-meta columns, a one-row line item
//! table, a totals block and a rotated "PAID" stamp. All money values are
//! integer cents formatted with a dot decimal separator regardless of
//! locale.

use chrono::{DateTime, Utc};
use printpdf::utils::{calculate_points_for_circle, calculate_points_for_rect};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Pt, Rgb,
    TextMatrix,
};
use thiserror::Error;

use shared::money::format_cents;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

impl From<printpdf::Error> for InvoiceError {
    fn from(err: printpdf::Error) -> Self {
        InvoiceError::Render(err.to_string())
    }
}

/// Everything the renderer needs about one approved credit purchase.
#[derive(Debug, Clone)]
pub struct InvoiceData {
    pub invoice_number: String,
    pub issued_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub description: String,
    pub amount_cents: i64,
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;

const INK: (f32, f32, f32) = (0.13, 0.13, 0.16);
const ACCENT: (f32, f32, f32) = (0.23, 0.35, 0.78);
const PAID_GREEN: (f32, f32, f32) = (0.16, 0.55, 0.30);

pub struct InvoiceGenerator;

impl InvoiceGenerator {
    /// Renders the invoice and returns the finished PDF bytes.
    pub fn generate(data: &InvoiceData) -> Result<Vec<u8>, InvoiceError> {
        let (doc, page, layer) = PdfDocument::new(
            format!("Invoice {}", data.invoice_number),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        draw_page_border(&layer);
        draw_header(&layer, &bold, &regular, data);
        draw_parties(&layer, &bold, &regular, data);
        let table_bottom = draw_line_item_table(&layer, &bold, &regular, data);
        draw_totals(&layer, &bold, &regular, data, table_bottom);
        draw_paid_stamp(&layer, &bold, table_bottom);
        draw_footer(&layer, &regular);

        let bytes = doc.save_to_bytes()?;
        Ok(bytes)
    }
}

/// Label/value pairs for the totals block. Tax is always zero; ad credit
/// purchases are not taxed at the point of sale.
fn totals_rows(amount_cents: i64) -> Vec<(&'static str, String)> {
    vec![
        ("Subtotal", format_cents(amount_cents)),
        ("Tax (0%)", format_cents(0)),
        ("Total", format_cents(amount_cents)),
    ]
}

fn set_ink(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

fn set_stroke(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32), thickness: f32) {
    layer.set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
    layer.set_outline_thickness(thickness);
}

fn stroke_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    let points = calculate_points_for_rect(
        Mm(width),
        Mm(height),
        Mm(x + width / 2.0),
        Mm(y + height / 2.0),
    );
    layer.add_line(Line {
        points,
        is_closed: true,
    });
}

fn stroke_hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    let points = vec![
        (printpdf::Point::new(Mm(x1), Mm(y)), false),
        (printpdf::Point::new(Mm(x2), Mm(y)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: false,
    });
}

fn draw_page_border(layer: &PdfLayerReference) {
    set_stroke(layer, INK, 0.8);
    stroke_rect(
        layer,
        MARGIN_MM,
        MARGIN_MM,
        PAGE_WIDTH_MM - 2.0 * MARGIN_MM,
        PAGE_HEIGHT_MM - 2.0 * MARGIN_MM,
    );
}

fn draw_header(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
    data: &InvoiceData,
) {
    set_ink(layer, ACCENT);
    layer.use_text("Mosaic", 22.0, Mm(MARGIN_MM + 8.0), Mm(268.0), bold);

    set_ink(layer, INK);
    layer.use_text("INVOICE", 16.0, Mm(150.0), Mm(268.0), bold);
    layer.use_text(
        data.invoice_number.as_str(),
        10.0,
        Mm(150.0),
        Mm(262.0),
        regular,
    );

    set_stroke(layer, ACCENT, 1.2);
    stroke_hline(layer, MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, 256.0);
}

fn draw_parties(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
    data: &InvoiceData,
) {
    let left = MARGIN_MM + 8.0;
    set_ink(layer, INK);

    layer.use_text("Billed to", 9.0, Mm(left), Mm(246.0), bold);
    layer.use_text(data.customer_name.as_str(), 11.0, Mm(left), Mm(240.0), regular);
    layer.use_text(
        data.customer_email.as_str(),
        9.0,
        Mm(left),
        Mm(235.0),
        regular,
    );

    layer.use_text("Issued", 9.0, Mm(150.0), Mm(246.0), bold);
    layer.use_text(
        data.issued_at.format("%Y-%m-%d").to_string(),
        10.0,
        Mm(150.0),
        Mm(240.0),
        regular,
    );
}

/// Draws the single-line-item table and returns the Y coordinate of its
/// bottom rule.
fn draw_line_item_table(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
    data: &InvoiceData,
) -> f32 {
    let left = MARGIN_MM + 8.0;
    let right = PAGE_WIDTH_MM - MARGIN_MM - 8.0;
    let top = 220.0;
    let row_height = 10.0;

    set_ink(layer, INK);
    layer.use_text("Description", 9.0, Mm(left), Mm(top), bold);
    layer.use_text("Amount", 9.0, Mm(right - 25.0), Mm(top), bold);

    set_stroke(layer, INK, 0.5);
    stroke_hline(layer, left, right, top - 3.0);

    let row_y = top - row_height;
    layer.use_text(data.description.as_str(), 10.0, Mm(left), Mm(row_y), regular);
    layer.use_text(
        format_cents(data.amount_cents),
        10.0,
        Mm(right - 25.0),
        Mm(row_y),
        regular,
    );

    let bottom = row_y - 4.0;
    stroke_hline(layer, left, right, bottom);
    bottom
}

fn draw_totals(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
    data: &InvoiceData,
    table_bottom: f32,
) {
    let label_x = 130.0;
    let value_x = PAGE_WIDTH_MM - MARGIN_MM - 33.0;
    let mut y = table_bottom - 8.0;

    set_ink(layer, INK);
    for (i, (label, value)) in totals_rows(data.amount_cents).iter().enumerate() {
        let font = if i == 2 { bold } else { regular };
        let size = if i == 2 { 11.0 } else { 9.5 };
        layer.use_text(*label, size, Mm(label_x), Mm(y), font);
        layer.use_text(value.as_str(), size, Mm(value_x), Mm(y), font);
        y -= 7.0;
    }
}

fn draw_paid_stamp(layer: &PdfLayerReference, bold: &IndirectFontRef, table_bottom: f32) {
    let cx = MARGIN_MM + 28.0;
    let cy = table_bottom - 18.0;

    set_stroke(layer, PAID_GREEN, 1.5);
    let circle = calculate_points_for_circle(Mm(14.0), Mm(cx), Mm(cy));
    layer.add_line(Line {
        points: circle,
        is_closed: true,
    });

    set_ink(layer, PAID_GREEN);
    layer.begin_text_section();
    layer.set_font(bold, 16.0);
    layer.set_text_matrix(TextMatrix::TranslateRotate(
        Mm(cx - 8.0).into_pt(),
        Mm(cy - 4.0).into_pt(),
        18.0,
    ));
    layer.write_text("PAID", bold);
    layer.end_text_section();
}

fn draw_footer(layer: &PdfLayerReference, regular: &IndirectFontRef) {
    set_ink(layer, INK);
    layer.use_text(
        "Thank you for advertising with Mosaic.",
        8.5,
        Mm(MARGIN_MM + 8.0),
        Mm(MARGIN_MM + 6.0),
        regular,
    );
    layer.use_text(
        "This invoice was generated automatically and is valid without a signature.",
        8.5,
        Mm(MARGIN_MM + 8.0),
        Mm(MARGIN_MM + 2.0),
        regular,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InvoiceData {
        InvoiceData {
            invoice_number: "INV-1A2B3C4D".to_string(),
            issued_at: Utc::now(),
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            description: "Advertising credit purchase".to_string(),
            amount_cents: 15_000,
        }
    }

    #[test]
    fn test_totals_match_purchase_amount() {
        let rows = totals_rows(15_000);
        assert_eq!(rows[0], ("Subtotal", "150.00".to_string()));
        assert_eq!(rows[1], ("Tax (0%)", "0.00".to_string()));
        assert_eq!(rows[2], ("Total", "150.00".to_string()));
    }

    #[test]
    fn test_subtotal_always_equals_total() {
        for cents in [1, 99, 100, 12_345, 1_000_000] {
            let rows = totals_rows(cents);
            assert_eq!(rows[0].1, rows[2].1);
            assert_eq!(rows[1].1, "0.00");
        }
    }

    #[test]
    fn test_generate_produces_pdf_bytes() {
        let bytes = InvoiceGenerator::generate(&sample()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }
}
