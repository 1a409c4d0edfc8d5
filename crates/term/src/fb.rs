//! Glyph grid the board view paints into before anything reaches the terminal.
//!
//! Coordinates are terminal columns and rows. Writes outside the grid are
//! dropped, so a board taller than the window simply loses its lower rows.

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

pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Colors and attributes of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dimmed(self) -> Self {
        Self { dim: true, ..self }
    }

    pub const fn glyph(self, ch: char) -> Glyph {
        Glyph { ch, style: self }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), BLACK)
    }
}

/// One terminal column of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Default for Glyph {
    fn default() -> Self {
        Style::default().glyph(' ')
    }
}

/// Horizontal stretch of glyphs on row `y` starting at column `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

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
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Change dimensions, reusing the allocation. Contents are unspecified until cleared.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(width as usize * height as usize, Glyph::default());
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.index(x, y).map(|i| self.glyphs[i])
    }

    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn clear(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: Style) {
        self.set(x, y, style.glyph(ch));
    }

    /// Write `s` left to right; returns the column after the last character.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: Style) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            self.put_char(cx, y, ch, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    /// Write a decimal number; returns the column after the last digit.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: Style) -> u16 {
        let mut digits = [b'0'; 10];
        let mut start = digits.len();
        let mut n = value;
        loop {
            start -= 1;
            digits[start] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        digits[start..]
            .iter()
            .fold(x, |cx, &d| {
                self.put_char(cx, y, d as char, style);
                cx.saturating_add(1)
            })
    }

    /// Fill a `w` x `h` rectangle with one glyph.
    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, glyph: Glyph) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.set(col, row, glyph);
            }
        }
    }

    /// Single-line box outline; boxes smaller than 2x2 are not drawn.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));

        self.fill(x + 1, y, w - 2, 1, style.glyph('─'));
        self.fill(x + 1, bottom, w - 2, 1, style.glyph('─'));
        self.fill(x, y + 1, 1, h - 2, style.glyph('│'));
        self.fill(right, y + 1, 1, h - 2, style.glyph('│'));

        self.put_char(x, y, '┌', style);
        self.put_char(right, y, '┐', style);
        self.put_char(x, bottom, '└', style);
        self.put_char(right, bottom, '┘', style);
    }

    /// One run per row covering the whole buffer.
    pub fn full_runs(&self) -> Vec<Run> {
        if self.width == 0 {
            return Vec::new();
        }
        (0..self.height)
            .map(|y| Run {
                x: 0,
                y,
                len: self.width,
            })
            .collect()
    }

    /// Maximal runs of glyphs that differ from `prev`; every row when sizes differ.
    pub fn changed_runs(&self, prev: &FrameBuffer) -> Vec<Run> {
        if !self.same_size(prev) {
            return self.full_runs();
        }

        let width = self.width as usize;
        let mut runs = Vec::new();
        if width == 0 {
            return runs;
        }
        for (y, (row, old)) in self
            .glyphs
            .chunks(width)
            .zip(prev.glyphs.chunks(width))
            .enumerate()
        {
            let mut start: Option<usize> = None;
            for x in 0..=width {
                let differs = x < width && row[x] != old[x];
                match (differs, start) {
                    (true, None) => start = Some(x),
                    (false, Some(s)) => {
                        runs.push(Run {
                            x: s as u16,
                            y: y as u16,
                            len: (x - s) as u16,
                        });
                        start = None;
                    }
                    _ => {}
                }
            }
        }
        runs
    }

    /// Row `y` as a string, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}
