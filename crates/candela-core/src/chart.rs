//! Text candlestick rendering.
//!
//! [`CandleChart`] is the render target handle: the caller owns it and passes
//! each new series to [`CandleChart::render_or_update`], which replaces
//! whatever was drawn before. [`CandleChart::lines`] draws the current series
//! top to bottom with Unicode box glyphs, resolving each row into upper wick,
//! body, or lower wick using quarter-cell thresholds.

use crate::ChartPoint;

const GLYPH_VOID: char = ' ';
const GLYPH_BODY: char = '┃';
const GLYPH_HALF_BODY_BOTTOM: char = '╻';
const GLYPH_HALF_BODY_TOP: char = '╹';
const GLYPH_WICK: char = '│';
const GLYPH_TOP: char = '╽';
const GLYPH_BOTTOM: char = '╿';
const GLYPH_UPPER_WICK: char = '╷';
const GLYPH_LOWER_WICK: char = '╵';

const BULLISH_ANSI: &str = "\x1b[32m";
const BEARISH_ANSI: &str = "\x1b[31m";
const RESET_ANSI: &str = "\x1b[0m";

/// Width of the price axis: `{:>9.2} │ `.
const Y_AXIS_WIDTH: usize = 12;
const Y_LABEL_EVERY: u16 = 4;
const PRICE_MARGIN: f64 = 0.02;

/// Whether the last call replaced an earlier series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartUpdate {
    Created,
    Replaced,
}

/// Caller-owned candlestick chart.
#[derive(Debug, Clone, Default)]
pub struct CandleChart {
    title: String,
    points: Vec<ChartPoint>,
    revision: u64,
    color: bool,
}

impl CandleChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit ANSI colors (green up, red down).
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Replace the held series; nothing from the previous one is kept.
    pub fn render_or_update(&mut self, title: impl Into<String>, points: &[ChartPoint]) -> ChartUpdate {
        let update = if self.revision == 0 {
            ChartUpdate::Created
        } else {
            ChartUpdate::Replaced
        };
        self.title = title.into();
        self.points = points.to_vec();
        self.revision += 1;
        update
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    /// Number of series rendered through this handle.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Draw the chart in `height` candle rows and `width` columns (axis included).
    ///
    /// When there are more points than columns the most recent ones are shown.
    pub fn lines(&self, height: u16, width: u16) -> Vec<String> {
        let mut lines = vec![self.title.clone()];

        let chart_width = usize::from(width).saturating_sub(Y_AXIS_WIDTH);
        if height == 0 || chart_width == 0 {
            lines.push(String::from("(chart area too small)"));
            return lines;
        }

        let visible = visible_points(&self.points, chart_width);
        let Some(scale) = PriceScale::from_points(visible, height) else {
            lines.push(String::from("(no price data)"));
            return lines;
        };
        let positions = candle_columns(chart_width, visible.len());

        for y in (1..=height).rev() {
            let mut row = scale.axis_label(y);
            let mut cells = vec![String::from(GLYPH_VOID); chart_width];
            for (point, &column) in visible.iter().zip(&positions) {
                let Some(ohlc) = point.ohlc() else {
                    continue;
                };
                let glyph = scale.glyph(ohlc, y);
                if glyph != GLYPH_VOID {
                    cells[column] = self.paint(glyph, ohlc);
                }
            }
            row.extend(cells);
            lines.push(row.trim_end().to_owned());
        }

        lines.push(format!("{:>9} └{}", "", "─".repeat(chart_width)));
        lines.push(date_axis(visible, chart_width));
        lines
    }

    fn paint(&self, glyph: char, (open, _, _, close): (f64, f64, f64, f64)) -> String {
        if !self.color {
            return glyph.to_string();
        }
        let color = if close >= open { BULLISH_ANSI } else { BEARISH_ANSI };
        format!("{color}{glyph}{RESET_ANSI}")
    }
}

fn visible_points(points: &[ChartPoint], max_visible: usize) -> &[ChartPoint] {
    if points.len() <= max_visible {
        points
    } else {
        &points[points.len() - max_visible..]
    }
}

/// Column of each candle, computed from the index so rounding never drifts.
fn candle_columns(chart_width: usize, count: usize) -> Vec<usize> {
    match count {
        0 => Vec::new(),
        1 => vec![chart_width / 2],
        _ => {
            let spacing = chart_width as f64 / count as f64;
            (0..count)
                .map(|i| {
                    let column = (i as f64 * spacing).round() as usize;
                    column.min(chart_width.saturating_sub(1))
                })
                .collect()
        }
    }
}

fn date_axis(visible: &[ChartPoint], chart_width: usize) -> String {
    let pad = " ".repeat(Y_AXIS_WIDTH);
    match (visible.first(), visible.last()) {
        (Some(first), Some(last)) if first.date != last.date => {
            let first = first.date.to_string();
            let last = last.date.to_string();
            let gap = chart_width.saturating_sub(first.len() + last.len()).max(1);
            format!("{pad}{first}{}{last}", " ".repeat(gap))
        }
        (Some(only), _) => format!("{pad}{}", only.date),
        _ => pad.trim_end().to_owned(),
    }
}

struct PriceScale {
    min: f64,
    max: f64,
    height: u16,
}

impl PriceScale {
    fn from_points(points: &[ChartPoint], height: u16) -> Option<Self> {
        let (low, high) = points
            .iter()
            .filter_map(ChartPoint::ohlc)
            .fold(None, |bounds: Option<(f64, f64)>, (_, high, low, _)| {
                Some(match bounds {
                    Some((min, max)) => (min.min(low), max.max(high)),
                    None => (low, high),
                })
            })?;

        let margin = (high - low) * PRICE_MARGIN;
        Some(Self {
            min: (low - margin).max(0.0),
            max: high + margin,
            height,
        })
    }

    fn to_height(&self, price: f64) -> f64 {
        if self.max == self.min {
            return f64::from(self.height) / 2.0;
        }
        (price - self.min) / (self.max - self.min) * f64::from(self.height)
    }

    fn axis_label(&self, y: u16) -> String {
        if y % Y_LABEL_EVERY == 0 {
            let price = self.min + f64::from(y) * (self.max - self.min) / f64::from(self.height);
            format!("{price:>9.2} │ ")
        } else {
            format!("{:>9} │ ", "")
        }
    }

    fn glyph(&self, (open, high, low, close): (f64, f64, f64, f64), y: u16) -> char {
        let unit = f64::from(y);
        let high_y = self.to_height(high);
        let low_y = self.to_height(low);
        let max_y = self.to_height(open.max(close));
        let min_y = self.to_height(open.min(close));

        if high_y.ceil() >= unit && unit >= max_y.floor() {
            // upper wick
            if max_y - unit > 0.75 {
                GLYPH_BODY
            } else if max_y - unit > 0.25 {
                if high_y - unit > 0.75 {
                    GLYPH_TOP
                } else {
                    GLYPH_HALF_BODY_BOTTOM
                }
            } else if high_y - unit > 0.75 {
                GLYPH_WICK
            } else if high_y - unit > 0.25 {
                GLYPH_UPPER_WICK
            } else {
                GLYPH_VOID
            }
        } else if max_y.floor() >= unit && unit >= min_y.ceil() {
            GLYPH_BODY
        } else if min_y.ceil() >= unit && unit >= low_y.floor() {
            // lower wick
            if min_y - unit < 0.25 {
                GLYPH_BODY
            } else if min_y - unit < 0.75 {
                if low_y - unit < 0.25 {
                    GLYPH_BOTTOM
                } else {
                    GLYPH_HALF_BODY_TOP
                }
            } else if low_y - unit < 0.25 {
                GLYPH_WICK
            } else if low_y - unit < 0.75 {
                GLYPH_LOWER_WICK
            } else {
                GLYPH_VOID
            }
        } else {
            GLYPH_VOID
        }
    }
}
