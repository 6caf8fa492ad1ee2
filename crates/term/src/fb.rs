//! Character framebuffer the game view draws into.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Foreground/background pair plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        fg: Rgb::new(220, 220, 220),
        bg: Rgb::new(0, 0, 0),
        bold: false,
    };

    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Style::PLAIN.bg,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn on(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        style: Style::PLAIN,
    };
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Row-major grid of glyphs. Writes outside the buffer are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions, keeping the allocation where possible.
    /// Contents are unspecified afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(width as usize * height as usize, Glyph::BLANK);
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn row(&self, y: u16) -> &[Glyph] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.glyphs[start..start + w]
    }

    #[inline]
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    pub fn put(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = Glyph { ch, style };
        }
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::BLANK);
    }

    /// Write `s` left to right starting at `(x, y)`. Returns the column after
    /// the last character written.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: Style) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put(cx, y, ch, style);
            cx += 1;
        }
        cx
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, mut n: u32, style: Style) -> u16 {
        let mut digits = [0u8; 10];
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let mut cx = x;
        for &d in digits[..len].iter().rev() {
            self.put(cx, y, d as char, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    /// Single-line box whose outer edge is `w` by `h`.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x + w - 1;
        let bottom = y + h - 1;
        for xx in x + 1..right {
            self.put(xx, y, '─', style);
            self.put(xx, bottom, '─', style);
        }
        for yy in y + 1..bottom {
            self.put(x, yy, '│', style);
            self.put(right, yy, '│', style);
        }
        self.put(x, y, '┌', style);
        self.put(right, y, '┐', style);
        self.put(x, bottom, '└', style);
        self.put(right, bottom, '┘', style);
    }

    /// Text content of one row, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}
