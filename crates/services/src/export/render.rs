//! Draws laid-out pages with `printpdf`.

use std::collections::HashMap;

use printpdf::image_crate::{DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};

use quiz_core::model::QuestionId;

use super::grouping::QuestionGroup;
use super::layout::{
    self, Element, HEADING_PT, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, Page, Tone,
};
use crate::error::ExportError;

const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;
const BASELINE_RATIO: f32 = 0.75;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn render_err(err: impl std::fmt::Display) -> ExportError {
    ExportError::Render(err.to_string())
}

fn color(tone: Tone) -> Color {
    match tone {
        Tone::Normal => Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)),
        Tone::Muted => Color::Rgb(Rgb::new(0.55, 0.55, 0.55, None)),
    }
}

/// Render the question sheet, followed by the answer key when requested.
///
/// # Errors
///
/// Returns `ExportError::Render` if the PDF cannot be assembled.
pub(crate) fn render_pdf(
    title: &str,
    groups: &[QuestionGroup],
    images: &HashMap<QuestionId, DynamicImage>,
    include_answers: bool,
) -> Result<Vec<u8>, ExportError> {
    let sizes: HashMap<QuestionId, (u32, u32)> = images
        .iter()
        .map(|(id, image)| (*id, image.dimensions()))
        .collect();

    let mut pages = layout::paginate(layout::question_sheet(title, groups, &sizes));
    if include_answers {
        pages.extend(layout::paginate(layout::answer_key(groups)));
    }

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_err)?,
    };

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        draw_page(&layer, page, &fonts, images);
    }

    doc.save_to_bytes().map_err(render_err)
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    fonts: &Fonts,
    images: &HashMap<QuestionId, DynamicImage>,
) {
    for placed in page {
        let top = placed.top_mm;
        match &placed.element {
            Element::Text {
                text,
                size_pt,
                indent_mm,
                centered,
                tone,
            } => {
                let x = if *centered {
                    ((PAGE_WIDTH_MM - layout::text_width_mm(text, *size_pt)) / 2.0).max(MARGIN_MM)
                } else {
                    MARGIN_MM + indent_mm
                };
                let baseline =
                    PAGE_HEIGHT_MM - top - layout::line_height_mm(*size_pt) * BASELINE_RATIO;
                let font = if *size_pt >= HEADING_PT {
                    &fonts.bold
                } else {
                    &fonts.regular
                };
                layer.set_fill_color(color(*tone));
                layer.use_text(text.as_str(), *size_pt, Mm(x), Mm(baseline), font);
            }
            Element::Rule { tone } => {
                let y = PAGE_HEIGHT_MM - top - 2.0;
                layer.set_outline_color(color(*tone));
                layer.set_outline_thickness(match tone {
                    Tone::Normal => 0.8,
                    Tone::Muted => 0.5,
                });
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(MARGIN_MM), Mm(y)), false),
                        (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)), false),
                    ],
                    is_closed: false,
                });
            }
            Element::Image {
                question,
                width_mm,
                height_mm,
            } => {
                if let Some(source) = images.get(question) {
                    draw_image(layer, source, top, *width_mm, *height_mm);
                }
            }
            Element::Space(_) => {}
        }
    }
}

fn draw_image(
    layer: &PdfLayerReference,
    source: &DynamicImage,
    top_mm: f32,
    width_mm: f32,
    height_mm: f32,
) {
    let (w_px, h_px) = source.dimensions();
    if w_px == 0 || h_px == 0 {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let native_w_mm = w_px as f32 / IMAGE_DPI * MM_PER_INCH;
    #[allow(clippy::cast_precision_loss)]
    let native_h_mm = h_px as f32 / IMAGE_DPI * MM_PER_INCH;

    // alpha channels are not supported by the embedded image path
    let rgb = DynamicImage::ImageRgb8(source.to_rgb8());
    Image::from_dynamic_image(&rgb).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM)),
            translate_y: Some(Mm(PAGE_HEIGHT_MM - top_mm - height_mm)),
            scale_x: Some(width_mm / native_w_mm),
            scale_y: Some(height_mm / native_h_mm),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}
