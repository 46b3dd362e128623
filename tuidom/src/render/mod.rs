use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{content_rect, LayoutResult, Rect};
use crate::text::{align_offset, char_width, display_width, tail_to_width, truncate_to_width};
use crate::types::{Color, ColorContext, Rgb, TextStyle, Theme};

/// Colors inherited from the nearest ancestor that set them.
#[derive(Debug, Clone, Copy)]
struct Inherited {
    fg: Rgb,
    bg: Rgb,
}

/// Paint `element` and its subtree into `buf` using positions from `layout`.
///
/// Elements without a layout rect are skipped along with their children.
/// Children are clipped to their parent's content area.
pub fn render_to_buffer(element: &Element, layout: &LayoutResult, buf: &mut Buffer, theme: &dyn Theme) {
    let ctx = ColorContext::new(theme);
    let inherited = Inherited {
        fg: ctx.resolve(&Color::var("foreground")).to_rgb(),
        bg: ctx.resolve(&Color::var("background")).to_rgb(),
    };
    let clip = Rect::from_size(buf.width(), buf.height());
    render_element(element, layout, buf, &ctx, inherited, clip);
}

fn render_element(
    element: &Element,
    layout: &LayoutResult,
    buf: &mut Buffer,
    ctx: &ColorContext,
    inherited: Inherited,
    clip: Rect,
) {
    let Some(rect) = layout.get(&element.id).copied() else {
        return;
    };
    let visible = intersect(rect, clip);
    if visible.is_empty() {
        return;
    }

    let style = element.effective_style();
    let fg = style
        .foreground
        .as_ref()
        .map(|c| ctx.resolve(c).to_rgb())
        .unwrap_or(inherited.fg);
    let bg = match &style.background {
        Some(color) => {
            let bg = ctx.resolve(color).to_rgb();
            fill(buf, visible, bg, fg);
            bg
        }
        None => inherited.bg,
    };
    let colors = Inherited { fg, bg };

    if let Some(glyphs) = style.border.glyphs() {
        let border_fg = style
            .border_color
            .as_ref()
            .map(|c| ctx.resolve(c).to_rgb())
            .unwrap_or(fg);
        draw_border(buf, rect, visible, glyphs, border_fg, bg);
    }

    let inner = content_rect(element, rect);
    let inner_clip = intersect(inner, visible);

    match &element.content {
        Content::Text(text) => {
            for (i, line) in text.lines().enumerate() {
                let y = inner.y + i as u16;
                if y >= inner.bottom() {
                    break;
                }
                let line = truncate_to_width(line, inner.width as usize);
                let offset = align_offset(display_width(&line), inner.width as usize, element.text_align);
                put_str(buf, inner.x + offset as u16, y, &line, colors, style.text_style, inner_clip);
            }
        }
        Content::TextInput {
            value,
            placeholder,
            mask,
            focused,
        } => {
            render_text_input(
                buf,
                inner,
                inner_clip,
                colors,
                style.text_style,
                value,
                placeholder.as_deref(),
                *mask,
                *focused,
            );
        }
        Content::Children(children) => {
            for child in children {
                render_element(child, layout, buf, ctx, colors, inner_clip);
            }
        }
        Content::None => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn render_text_input(
    buf: &mut Buffer,
    inner: Rect,
    clip: Rect,
    colors: Inherited,
    text_style: TextStyle,
    value: &str,
    placeholder: Option<&str>,
    mask: Option<char>,
    focused: bool,
) {
    if inner.is_empty() {
        return;
    }
    let width = inner.width as usize;
    // Keep one cell free for the cursor while focused
    let text_width = if focused { width.saturating_sub(1) } else { width };

    let cursor_x = if value.is_empty() {
        if let Some(placeholder) = placeholder {
            let shown = truncate_to_width(placeholder, text_width);
            put_str(buf, inner.x, inner.y, &shown, colors, text_style.dim(), clip);
        }
        inner.x
    } else {
        let display: String = match mask {
            Some(glyph) => value.chars().map(|_| glyph).collect(),
            None => value.to_string(),
        };
        let shown = tail_to_width(&display, text_width);
        put_str(buf, inner.x, inner.y, shown, colors, text_style, clip);
        inner.x + display_width(shown) as u16
    };

    if focused && clip.contains(cursor_x, inner.y) {
        // Placeholder text under the cursor stays readable
        let under = buf.get(cursor_x, inner.y).map(|c| c.char).unwrap_or(' ');
        let cursor = Cell::new(under)
            .with_fg(colors.fg)
            .with_bg(colors.bg)
            .with_style(text_style.reverse());
        buf.set(cursor_x, inner.y, cursor);
    }
}

fn intersect(a: Rect, b: Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
}

fn fill(buf: &mut Buffer, area: Rect, bg: Rgb, fg: Rgb) {
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            buf.set(x, y, Cell::new(' ').with_fg(fg).with_bg(bg));
        }
    }
}

fn draw_border(
    buf: &mut Buffer,
    rect: Rect,
    clip: Rect,
    glyphs: (char, char, char, char, char, char),
    fg: Rgb,
    bg: Rgb,
) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let (tl, tr, bl, br, h, v) = glyphs;
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    let mut put = |x: u16, y: u16, ch: char| {
        if clip.contains(x, y) {
            buf.set(x, y, Cell::new(ch).with_fg(fg).with_bg(bg));
        }
    };

    for x in rect.x + 1..right {
        put(x, rect.y, h);
        put(x, bottom, h);
    }
    for y in rect.y + 1..bottom {
        put(rect.x, y, v);
        put(right, y, v);
    }
    put(rect.x, rect.y, tl);
    put(right, rect.y, tr);
    put(rect.x, bottom, bl);
    put(right, bottom, br);
}

/// Write a string starting at (x, y). Cells outside `clip` are skipped and a
/// wide character that would straddle the clip edge is dropped.
fn put_str(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    text: &str,
    colors: Inherited,
    style: TextStyle,
    clip: Rect,
) {
    let mut cx = x;
    for ch in text.chars() {
        let width = char_width(ch) as u16;
        if width == 0 {
            continue;
        }
        if !clip.contains(cx, y) || (width == 2 && !clip.contains(cx + 1, y)) {
            cx = cx.saturating_add(width);
            continue;
        }

        let bg = buf.get(cx, y).map(|c| c.bg).unwrap_or(colors.bg);
        buf.set(cx, y, Cell::new(ch).with_fg(colors.fg).with_bg(bg).with_style(style));
        if width == 2 {
            let mut continuation = Cell::new(' ').with_fg(colors.fg).with_bg(bg);
            continuation.wide_continuation = true;
            buf.set(cx + 1, y, continuation);
        }
        cx = cx.saturating_add(width);
    }
}
