//! Charts
//!
//! SVG renderings of the rollups:
//!
//! - [`LineChart`]: date on x, order count on y, optional area fill, month
//!   ticks and a max-point annotation
//! - [`BarChart`]: horizontal bars per category, optionally mirrored
//! - [`render_bar_pair`]: best and worst charts side by side

use chrono::{Datelike, NaiveDate};

use super::svg::{Anchor, Svg, TextStyle};
use crate::rollup::{self, CategoryRollupRow, DailyRollupRow};

/// Line colour of the full-range daily chart and the highlighted bar
pub const PRIMARY: &str = "#90CAF9";
/// Colour of the non-highlighted bars
pub const MUTED: &str = "#D3D3D3";
/// Line colour of the windowed chart
pub const WINDOW_LINE: &str = "#72BCD4";
/// Area fill of the windowed chart
pub const WINDOW_FILL: &str = "#B2E0EB";

const AXIS: &str = "#555555";
const GRID: &str = "#AAAAAA";

/// Space reserved around the plot area
#[derive(Debug, Clone, Copy)]
struct Margins {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

/// Plot-area geometry
#[derive(Debug, Clone, Copy)]
struct Frame {
    width: f64,
    height: f64,
    margins: Margins,
}

impl Frame {
    fn left(&self) -> f64 {
        self.margins.left
    }

    fn right(&self) -> f64 {
        self.width - self.margins.right
    }

    fn top(&self) -> f64 {
        self.margins.top
    }

    fn bottom(&self) -> f64 {
        self.height - self.margins.bottom
    }

    fn plot_width(&self) -> f64 {
        self.right() - self.left()
    }

    fn plot_height(&self) -> f64 {
        self.bottom() - self.top()
    }
}

/// How x-axis ticks are placed and labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTicks {
    /// About six evenly spaced ticks labelled `YYYY-MM`
    Even,
    /// A tick at every month start, labelled with the month name and year
    MonthStarts,
}

/// Area under the line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaFill {
    pub color: &'static str,
    pub opacity: f64,
}

/// Marker for the highest point of a series
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub date: NaiveDate,
    pub value: u64,
    pub label: String,
}

impl Annotation {
    /// Annotate the first maximum of the series, `None` when it is empty
    pub fn at_peak(rows: &[DailyRollupRow]) -> Option<Self> {
        rollup::peak(rows).map(|row| Self {
            date: row.date,
            value: row.order_count,
            label: format!("Max: {}", row.order_count),
        })
    }
}

/// Daily order-count line chart
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub points: Vec<(NaiveDate, u64)>,
    pub stroke: &'static str,
    pub fill: Option<AreaFill>,
    pub ticks: DateTicks,
    pub grid: bool,
    pub annotation: Option<Annotation>,
    pub width: f64,
    pub height: f64,
}

impl LineChart {
    /// Plain line chart of order count per day
    pub fn order_count(rows: &[DailyRollupRow]) -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            points: rows.iter().map(|r| (r.date, r.order_count)).collect(),
            stroke: PRIMARY,
            fill: None,
            ticks: DateTicks::Even,
            grid: false,
            annotation: None,
            width: 1500.0,
            height: 500.0,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
        self
    }

    pub fn stroke(mut self, color: &'static str) -> Self {
        self.stroke = color;
        self
    }

    pub fn fill(mut self, color: &'static str, opacity: f64) -> Self {
        self.fill = Some(AreaFill { color, opacity });
        self
    }

    pub fn ticks(mut self, ticks: DateTicks) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn grid(mut self) -> Self {
        self.grid = true;
        self
    }

    pub fn annotation(mut self, annotation: Option<Annotation>) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn render(&self) -> String {
        let bottom_margin = match self.ticks {
            DateTicks::Even => 60.0,
            DateTicks::MonthStarts => 130.0,
        };
        let frame = Frame {
            width: self.width,
            height: self.height,
            margins: Margins {
                top: if self.title.is_some() { 70.0 } else { 30.0 },
                right: 40.0,
                bottom: bottom_margin,
                left: 90.0,
            },
        };

        let mut svg = Svg::new(self.width, self.height);
        svg.rect(0.0, 0.0, self.width, self.height, "white");
        if self.annotation.is_some() {
            svg.arrow_marker();
        }

        if let Some(title) = &self.title {
            svg.text(
                self.width / 2.0,
                40.0,
                title,
                TextStyle::new(24.0).anchor(Anchor::Middle),
            );
        }

        // Headroom so the annotation text stays inside the plot
        let data_max = self.points.iter().map(|(_, v)| *v).max().unwrap_or(0) as f64;
        let headroom = if self.annotation.is_some() { 1.2 } else { 1.05 };
        let y_axis = nice_axis(data_max * headroom);

        let y_of = |v: f64| frame.bottom() - v / y_axis.max * frame.plot_height();

        let span = match (self.points.first(), self.points.last()) {
            (Some((first, _)), Some((last, _))) => Some((*first, *last)),
            _ => None,
        };
        let x_of = |date: NaiveDate| match span {
            Some((first, last)) if last > first => {
                let total = (last - first).num_days() as f64;
                frame.left() + (date - first).num_days() as f64 / total * frame.plot_width()
            }
            _ => frame.left() + frame.plot_width() / 2.0,
        };

        // y gridlines and ticks
        for tick in y_axis.ticks() {
            let y = y_of(tick);
            if self.grid {
                svg.dashed_line((frame.left(), y), (frame.right(), y), GRID, 0.7);
            }
            svg.line((frame.left() - 6.0, y), (frame.left(), y), AXIS, 1.0);
            svg.text(
                frame.left() - 10.0,
                y + 6.0,
                &format_tick(tick),
                TextStyle::new(18.0).anchor(Anchor::End),
            );
        }

        // x ticks
        if let Some((first, last)) = span {
            for (date, label) in date_ticks(first, last, self.ticks) {
                let x = x_of(date);
                svg.line((x, frame.bottom()), (x, frame.bottom() + 6.0), AXIS, 1.0);
                match self.ticks {
                    DateTicks::Even => svg.text(
                        x,
                        frame.bottom() + 28.0,
                        &label,
                        TextStyle::new(15.0).anchor(Anchor::Middle),
                    ),
                    DateTicks::MonthStarts => svg.text(
                        x,
                        frame.bottom() + 20.0,
                        &label,
                        TextStyle::new(13.0).anchor(Anchor::End).rotate(-45.0),
                    ),
                }
            }
        }

        // axes
        svg.line((frame.left(), frame.top()), (frame.left(), frame.bottom()), AXIS, 1.0);
        svg.line((frame.left(), frame.bottom()), (frame.right(), frame.bottom()), AXIS, 1.0);

        let coords: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|(d, v)| (x_of(*d), y_of(*v as f64)))
            .collect();

        if let (Some(fill), Some(first), Some(last)) = (self.fill, coords.first(), coords.last()) {
            let mut area = coords.clone();
            area.push((last.0, frame.bottom()));
            area.push((first.0, frame.bottom()));
            svg.polygon(&area, fill.color, fill.opacity);
        }

        if !coords.is_empty() {
            svg.polyline(&coords, self.stroke, 2.0);
            for point in &coords {
                svg.circle(*point, 3.5, self.stroke);
            }
        }

        if let Some(annotation) = &self.annotation {
            let target = (x_of(annotation.date), y_of(annotation.value as f64));
            let label_y = (target.1 - 45.0).max(frame.top() + 14.0);
            svg.text(
                target.0,
                label_y,
                &annotation.label,
                TextStyle::new(14.0).anchor(Anchor::Middle),
            );
            svg.arrow((target.0, label_y + 6.0), (target.0, target.1 - 5.0));
        }

        if let Some(x_label) = &self.x_label {
            svg.text(
                frame.left() + frame.plot_width() / 2.0,
                self.height - 12.0,
                x_label,
                TextStyle::new(16.0).anchor(Anchor::Middle),
            );
        }
        if let Some(y_label) = &self.y_label {
            let x = 24.0;
            let y = frame.top() + frame.plot_height() / 2.0;
            svg.text(
                x,
                y,
                y_label,
                TextStyle::new(16.0).anchor(Anchor::Middle).rotate(-90.0),
            );
        }

        svg.finish()
    }
}

/// Horizontal bar chart of category sales
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub bars: Vec<CategoryRollupRow>,
    /// Bars grow right-to-left and category labels sit on the right
    pub mirrored: bool,
    pub width: f64,
    pub height: f64,
}

impl BarChart {
    pub fn new(title: impl Into<String>, bars: Vec<CategoryRollupRow>) -> Self {
        Self {
            title: title.into(),
            x_label: "Number of Sales".to_string(),
            bars,
            mirrored: false,
            width: 1000.0,
            height: 600.0,
        }
    }

    pub fn mirrored(mut self) -> Self {
        self.mirrored = true;
        self
    }

    fn draw(&self) -> Svg {
        let label_space = 260.0;
        let frame = Frame {
            width: self.width,
            height: self.height,
            margins: Margins {
                top: 80.0,
                right: if self.mirrored { label_space } else { 40.0 },
                bottom: 90.0,
                left: if self.mirrored { 40.0 } else { label_space },
            },
        };

        let mut svg = Svg::new(self.width, self.height);
        svg.rect(0.0, 0.0, self.width, self.height, "white");
        svg.text(
            frame.left() + frame.plot_width() / 2.0,
            45.0,
            &self.title,
            TextStyle::new(25.0).anchor(Anchor::Middle),
        );

        let data_max = self.bars.iter().map(|b| b.number_of_sales).max().unwrap_or(0) as f64;
        let x_axis = nice_axis(data_max);
        let length_of = |v: f64| v / x_axis.max * frame.plot_width();
        // value -> x position, measured from the baseline side
        let x_of = |v: f64| {
            if self.mirrored {
                frame.right() - length_of(v)
            } else {
                frame.left() + length_of(v)
            }
        };

        for tick in x_axis.ticks() {
            let x = x_of(tick);
            svg.line((x, frame.bottom()), (x, frame.bottom() + 6.0), AXIS, 1.0);
            svg.text(
                x,
                frame.bottom() + 26.0,
                &format_tick(tick),
                TextStyle::new(15.0).anchor(Anchor::Middle),
            );
        }

        let baseline = if self.mirrored { frame.right() } else { frame.left() };
        svg.line((baseline, frame.top()), (baseline, frame.bottom()), AXIS, 1.0);
        svg.line((frame.left(), frame.bottom()), (frame.right(), frame.bottom()), AXIS, 1.0);

        let slot = if self.bars.is_empty() {
            0.0
        } else {
            frame.plot_height() / self.bars.len() as f64
        };
        for (idx, bar) in self.bars.iter().enumerate() {
            let color = if idx == 0 { PRIMARY } else { MUTED };
            let length = length_of(bar.number_of_sales as f64);
            let y = frame.top() + idx as f64 * slot + slot * 0.1;
            let x = if self.mirrored { frame.right() - length } else { frame.left() };
            svg.rect(x, y, length, slot * 0.8, color);

            let (label_x, anchor) = if self.mirrored {
                (frame.right() + 10.0, Anchor::Start)
            } else {
                (frame.left() - 10.0, Anchor::End)
            };
            svg.text(
                label_x,
                y + slot * 0.4 + 5.0,
                &bar.category,
                TextStyle::new(15.0).anchor(anchor),
            );
        }

        svg.text(
            frame.left() + frame.plot_width() / 2.0,
            self.height - 25.0,
            &self.x_label,
            TextStyle::new(20.0).anchor(Anchor::Middle),
        );

        svg
    }

    pub fn render(&self) -> String {
        self.draw().finish()
    }
}

/// Best and worst category charts next to each other, the worst one mirrored
pub fn render_bar_pair(best: &[CategoryRollupRow], worst: &[CategoryRollupRow]) -> String {
    let left = BarChart::new("Best Performing Product", best.to_vec());
    let right = BarChart::new("Worst Performing Product", worst.to_vec()).mirrored();

    let mut svg = Svg::new(left.width + right.width, left.height.max(right.height));
    let offset = left.width;
    svg.nest(0.0, 0.0, left.draw());
    svg.nest(offset, 0.0, right.draw());
    svg.finish()
}

/// A zero-based value axis with round tick steps
#[derive(Debug, Clone, Copy, PartialEq)]
struct ValueAxis {
    max: f64,
    step: f64,
}

impl ValueAxis {
    fn ticks(&self) -> impl Iterator<Item = f64> {
        let step = self.step;
        let count = (self.max / step).round() as usize;
        (0..=count).map(move |i| i as f64 * step)
    }
}

/// Round the axis up to a 1/2/5 multiple giving about five intervals
fn nice_axis(max_value: f64) -> ValueAxis {
    if max_value <= 0.0 {
        return ValueAxis { max: 1.0, step: 1.0 };
    }

    let raw_step = max_value / 5.0;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    // order counts are whole numbers
    let step = (nice * magnitude).max(1.0);

    ValueAxis {
        max: (max_value / step).ceil() * step,
        step,
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Tick positions and labels along the date axis
fn date_ticks(first: NaiveDate, last: NaiveDate, style: DateTicks) -> Vec<(NaiveDate, String)> {
    match style {
        DateTicks::MonthStarts => month_starts(first, last)
            .into_iter()
            .map(|d| (d, d.format("%B %Y").to_string()))
            .collect(),
        DateTicks::Even => {
            let total = (last - first).num_days();
            let count = total.clamp(0, 6);
            if count == 0 {
                return vec![(first, first.format("%Y-%m-%d").to_string())];
            }
            (0..=count)
                .map(|i| first + chrono::Duration::days(total * i / count))
                .map(|d| (d, d.format("%Y-%m").to_string()))
                .collect()
        }
    }
}

/// First day of every month intersecting `[first, last]`, clamped to `first`
fn month_starts(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let mut out = vec![first];
    let mut year = first.year();
    let mut month = first.month();
    loop {
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(d) if d <= last => out.push(d),
            _ => break,
        }
    }
    out
}
