//! Flushes framebuffers to a terminal, sending only the cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

/// Terminal output with a retained copy of the last frame.
///
/// Generic over the sink so tests can render into a `Vec<u8>`.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next draw repaints everything (after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `frame`, then swap it with the retained frame so the caller gets a
    /// buffer back to draw the next frame into.
    pub fn draw_swap(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.shown.take() {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_diff_into(&prev, frame, &mut self.buf)?;
                self.flush_buf()?;
                self.shown = Some(std::mem::replace(frame, prev));
            }
            _ => {
                encode_full_into(frame, &mut self.buf)?;
                self.flush_buf()?;
                self.shown = Some(frame.clone());
            }
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full repaint of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        write_glyphs(out, fb.row(y), &mut pen)?;
    }
    finish(out)
}

/// Encode only the runs of cells that differ between `prev` and `next`.
/// Both buffers must have the same dimensions.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = None;
    for y in 0..next.height() {
        for (start, end) in changed_runs(prev.row(y), next.row(y)) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            write_glyphs(out, &next.row(y)[start..end], &mut pen)?;
        }
    }
    finish(out)
}

/// Half-open column ranges where the two rows differ.
fn changed_runs<'a>(a: &'a [Glyph], b: &'a [Glyph]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < b.len() && a.get(x) == b.get(x) {
            x += 1;
        }
        if x >= b.len() {
            return None;
        }
        let start = x;
        while x < b.len() && a.get(x) != b.get(x) {
            x += 1;
        }
        Some((start, x))
    })
}

fn write_glyphs(out: &mut Vec<u8>, glyphs: &[Glyph], pen: &mut Option<Style>) -> Result<()> {
    for g in glyphs {
        if *pen != Some(g.style) {
            set_style(out, g.style)?;
            *pen = Some(g.style);
        }
        out.queue(Print(g.ch))?;
    }
    Ok(())
}

fn set_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(a: &FrameBuffer, b: &FrameBuffer, y: u16) -> Vec<(usize, usize)> {
        changed_runs(a.row(y), b.row(y)).collect()
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(6, 1);
        let mut b = FrameBuffer::new(6, 1);
        for x in 1..=3 {
            b.put(x, 0, 'X', Style::PLAIN);
        }
        b.put(5, 0, 'Y', Style::PLAIN);
        assert_eq!(runs(&a, &b, 0), vec![(1, 4), (5, 6)]);
    }

    #[test]
    fn identical_frames_have_no_runs() {
        let a = FrameBuffer::new(4, 2);
        assert!(runs(&a, &a.clone(), 0).is_empty());

        let mut out = Vec::new();
        encode_diff_into(&a, &a, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains('X'));
    }

    #[test]
    fn style_change_alone_is_a_diff() {
        let a = FrameBuffer::new(2, 1);
        let mut b = FrameBuffer::new(2, 1);
        b.put(0, 0, ' ', Style::PLAIN.bold());
        assert_eq!(runs(&a, &b, 0), vec![(0, 1)]);
    }

    #[test]
    fn draw_swap_full_then_diff() {
        let mut r = TerminalRenderer::with_writer(Vec::new());

        let mut frame = FrameBuffer::new(3, 1);
        frame.put_str(0, 0, "abc", Style::PLAIN);
        r.draw_swap(&mut frame).unwrap();
        let first = String::from_utf8(r.writer().clone()).unwrap();
        assert!(first.contains('a') && first.contains('c'));

        frame.clear();
        frame.put_str(0, 0, "abZ", Style::PLAIN);
        let before = r.writer().len();
        r.draw_swap(&mut frame).unwrap();
        let second = String::from_utf8(r.writer()[before..].to_vec()).unwrap();
        assert!(second.contains('Z'));
        assert!(!second.contains('a'), "unchanged cells are not resent");
    }

    #[test]
    fn resize_forces_full_repaint() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        let mut frame = FrameBuffer::new(2, 1);
        frame.put_str(0, 0, "ab", Style::PLAIN);
        r.draw_swap(&mut frame).unwrap();

        let mut bigger = FrameBuffer::new(3, 1);
        bigger.put_str(0, 0, "ab", Style::PLAIN);
        let before = r.writer().len();
        r.draw_swap(&mut bigger).unwrap();
        let text = String::from_utf8(r.writer()[before..].to_vec()).unwrap();
        assert!(text.contains('a'));
    }
}
