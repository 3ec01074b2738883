//! Page layout for the question sheet and answer key, independent of the PDF backend.

use std::collections::HashMap;

use quiz_core::model::{Question, QuestionId, QuestionKind};

use super::grouping::QuestionGroup;

pub(crate) const PAGE_WIDTH_MM: f32 = 210.0;
pub(crate) const PAGE_HEIGHT_MM: f32 = 297.0;
pub(crate) const MARGIN_MM: f32 = 15.0;

const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_EM: f32 = 0.5;

const TITLE_PT: f32 = 18.0;
pub(crate) const HEADING_PT: f32 = 16.0;
const PROMPT_PT: f32 = 14.0;
const STATUS_PT: f32 = 10.0;
const OPTION_PT: f32 = 12.0;
const ANSWER_PT: f32 = 11.0;

const OPTION_INDENT_MM: f32 = 7.0;
const IMAGE_MAX_WIDTH_MM: f32 = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) * 0.6;
const IMAGE_MAX_HEIGHT_MM: f32 = 42.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Normal,
    Muted,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Element {
    Text {
        text: String,
        size_pt: f32,
        indent_mm: f32,
        centered: bool,
        tone: Tone,
    },
    /// Horizontal rule: muted for answer lines, normal under headings.
    Rule { tone: Tone },
    Image {
        question: QuestionId,
        width_mm: f32,
        height_mm: f32,
    },
    Space(f32),
}

impl Element {
    pub(crate) fn height_mm(&self) -> f32 {
        match self {
            Element::Text { size_pt, .. } => line_height_mm(*size_pt),
            Element::Rule { .. } => 4.0,
            Element::Image { height_mm, .. } => height_mm + 2.0,
            Element::Space(mm) => *mm,
        }
    }
}

/// Elements that must stay on one page.
pub(crate) type Block = Vec<Element>;

/// Placed element: top edge measured from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Placed {
    pub element: Element,
    pub top_mm: f32,
}

pub(crate) type Page = Vec<Placed>;

pub(crate) fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_SPACING
}

pub(crate) fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let chars = text.chars().count() as f32;
    chars * size_pt * PT_TO_MM * GLYPH_WIDTH_EM
}

fn usable_width_mm() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

/// Greedy word wrap to a character budget; overlong words are split.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn text_lines(text: &str, size_pt: f32, indent_mm: f32, tone: Tone) -> Vec<Element> {
    let glyph = size_pt * PT_TO_MM * GLYPH_WIDTH_EM;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_chars = ((usable_width_mm() - indent_mm) / glyph).floor() as usize;
    wrap_text(text, max_chars)
        .into_iter()
        .map(|line| Element::Text {
            text: line,
            size_pt,
            indent_mm,
            centered: false,
            tone,
        })
        .collect()
}

fn centered(text: &str, size_pt: f32) -> Element {
    Element::Text {
        text: text.to_owned(),
        size_pt,
        indent_mm: 0.0,
        centered: true,
        tone: Tone::Normal,
    }
}

/// Image box size in mm for a picture of the given pixel size.
pub(crate) fn fit_image_mm(width_px: u32, height_px: u32) -> (f32, f32) {
    if width_px == 0 || height_px == 0 {
        return (0.0, 0.0);
    }
    #[allow(clippy::cast_precision_loss)]
    let (w, h) = (width_px as f32, height_px as f32);
    let scale = (IMAGE_MAX_WIDTH_MM / w).min(IMAGE_MAX_HEIGHT_MM / h);
    (w * scale, h * scale)
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'a'.checked_add(i))
        .filter(u8::is_ascii_lowercase)
        .map_or('?', char::from)
}

fn question_block(
    number: usize,
    question: &Question,
    image_sizes: &HashMap<QuestionId, (u32, u32)>,
) -> Block {
    let mut block = Vec::new();
    if !question.is_active() {
        block.extend(text_lines("(Inactive Question)", STATUS_PT, 0.0, Tone::Muted));
    }
    block.extend(text_lines(
        &format!("{number}. {}", question.prompt()),
        PROMPT_PT,
        0.0,
        Tone::Normal,
    ));

    match question.kind() {
        QuestionKind::Text => block.push(Element::Rule { tone: Tone::Muted }),
        QuestionKind::MultipleChoice => {
            for (i, option) in question.options().iter().enumerate() {
                block.extend(text_lines(
                    &format!("{}. {option}", option_letter(i)),
                    OPTION_PT,
                    OPTION_INDENT_MM,
                    Tone::Normal,
                ));
            }
        }
        QuestionKind::TrueFalse => {
            for line in ["a. True", "b. False"] {
                block.extend(text_lines(line, OPTION_PT, OPTION_INDENT_MM, Tone::Normal));
            }
        }
        QuestionKind::Image => {
            if let Some(&(w, h)) = image_sizes.get(&question.id()) {
                let (width_mm, height_mm) = fit_image_mm(w, h);
                block.push(Element::Image {
                    question: question.id(),
                    width_mm,
                    height_mm,
                });
            }
            block.push(Element::Rule { tone: Tone::Muted });
        }
    }
    block.push(Element::Space(3.0));
    block
}

fn heading_block(name: &str) -> Block {
    let mut block = vec![Element::Space(4.0)];
    block.extend(text_lines(name, HEADING_PT, 0.0, Tone::Normal));
    block.push(Element::Rule { tone: Tone::Normal });
    block
}

/// Question sheet blocks. The first question of each group shares a block
/// with its heading so headings never end a page.
pub(crate) fn question_sheet(
    title: &str,
    groups: &[QuestionGroup],
    image_sizes: &HashMap<QuestionId, (u32, u32)>,
) -> Vec<Block> {
    let mut blocks = vec![vec![centered(title, TITLE_PT), Element::Space(6.0)]];
    for group in groups {
        let mut heading = heading_block(&group.category_name);
        for (i, question) in group.questions.iter().enumerate() {
            let block = question_block(i + 1, question, image_sizes);
            if i == 0 {
                heading.extend(block);
                blocks.push(std::mem::take(&mut heading));
            } else {
                blocks.push(block);
            }
        }
        if !heading.is_empty() {
            blocks.push(heading);
        }
    }
    blocks
}

/// Answer key blocks: per category a heading and `n. answer` lines.
pub(crate) fn answer_key(groups: &[QuestionGroup]) -> Vec<Block> {
    let mut blocks = vec![vec![centered("Answer Key", HEADING_PT), Element::Space(4.0)]];
    for group in groups {
        let mut block = heading_block(&group.category_name);
        for (i, question) in group.questions.iter().enumerate() {
            let suffix = if question.is_active() { "" } else { " (Inactive)" };
            block.extend(text_lines(
                &format!("{}. {}{suffix}", i + 1, question.correct_answer()),
                ANSWER_PT,
                0.0,
                Tone::Normal,
            ));
        }
        blocks.push(block);
    }
    blocks
}

/// Flow blocks onto pages. A block that does not fit starts a new page;
/// a block taller than a page is split element by element.
pub(crate) fn paginate(blocks: Vec<Block>) -> Vec<Page> {
    let bottom = PAGE_HEIGHT_MM - MARGIN_MM;
    let mut pages: Vec<Page> = vec![Vec::new()];
    let mut cursor = MARGIN_MM;

    for block in blocks {
        let height: f32 = block.iter().map(Element::height_mm).sum();
        let page_has_content = pages.last().is_some_and(|p| !p.is_empty());
        if cursor + height > bottom && page_has_content {
            pages.push(Vec::new());
            cursor = MARGIN_MM;
        }
        for element in block {
            let h = element.height_mm();
            if cursor + h > bottom && pages.last().is_some_and(|p| !p.is_empty()) {
                pages.push(Vec::new());
                cursor = MARGIN_MM;
            }
            if let Some(page) = pages.last_mut() {
                page.push(Placed {
                    element,
                    top_mm: cursor,
                });
            }
            cursor += h;
        }
    }
    pages
}
