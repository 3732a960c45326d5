use crate::error::RenderError;
use crate::pipeline::analyze::Analysis;
use crate::types::chart::ChartOptions;
use crate::types::zone::UNKNOWN_ZONE;

const AXIS_COLOR: &str = "#424242";
const GRID_COLOR: &str = "#E0E0E0";
const FONT_FAMILY: &str = "DejaVu Sans, Geist, sans-serif";
const ZONE_BAND_OPACITY: f64 = 0.14;
const RAW_HR_OPACITY: f64 = 0.35;
const TICK_COUNT: usize = 5;
const HR_AXIS_MARGIN_BPM: f64 = 5.0;
/// Paces slower than this are treated like standing still on the chart.
const MAX_DISPLAY_PACE: f64 = 20.0;
const UNKNOWN_ZONE_COLOR: &str = "#607D8B";

#[derive(Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn from_options(options: &ChartOptions) -> Result<Self, RenderError> {
        let padding = options.padding as f64;
        let width = options.width as f64 - 2.0 * padding;
        let height = options.height as f64 - 2.0 * padding;
        if width <= 0.0 || height <= 0.0 {
            return Err(RenderError::InvalidViewport(format!(
                "{}x{} leaves no room inside {}px padding",
                options.width, options.height, options.padding
            )));
        }
        Ok(Self {
            left: padding,
            top: padding,
            width,
            height,
        })
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Linear map from a data range onto a pixel range; `lo` maps to `start`.
#[derive(Clone, Copy)]
struct Scale {
    lo: f64,
    hi: f64,
    start: f64,
    end: f64,
}

impl Scale {
    fn new(lo: f64, hi: f64, start: f64, end: f64) -> Self {
        let hi = if hi - lo > f64::EPSILON { hi } else { lo + 1.0 };
        Self { lo, hi, start, end }
    }

    fn map(&self, value: f64) -> f64 {
        self.start + (value - self.lo) / (self.hi - self.lo) * (self.end - self.start)
    }

    fn ticks(&self) -> Vec<f64> {
        (0..TICK_COUNT)
            .map(|i| self.lo + (self.hi - self.lo) * i as f64 / (TICK_COUNT - 1) as f64)
            .collect()
    }
}

/// Heart rate (left axis, zone bands behind it) and pace (right axis,
/// inverted so faster is higher) against elapsed minutes.
pub fn render_activity_chart(
    analysis: &Analysis,
    options: &ChartOptions,
) -> Result<String, RenderError> {
    let area = PlotArea::from_options(options)?;
    let samples = &analysis.samples;
    if samples.is_empty() {
        return Err(RenderError::InvalidViewport("no samples to plot".to_string()));
    }

    let duration = samples
        .last()
        .map(|sample| sample.elapsed_min)
        .unwrap_or(0.0);
    let x_scale = Scale::new(0.0, duration, area.left, area.right());

    let (hr_lo, hr_hi) = hr_bounds(analysis);
    let hr_scale = Scale::new(hr_lo, hr_hi, area.bottom(), area.top);

    let paces: Vec<Option<f64>> = samples
        .iter()
        .map(|sample| sample.pace_min_per_km.filter(|pace| *pace <= MAX_DISPLAY_PACE))
        .collect();
    let (pace_lo, pace_hi) = bounds(paces.iter().flatten().copied()).unwrap_or((4.0, 8.0));
    // Inverted: the fastest pace sits at the top of the plot.
    let pace_scale = Scale::new(pace_lo, pace_hi, area.top, area.bottom());

    let zone_bands = if options.show_zone_bands {
        build_zone_bands(analysis, &area, &hr_scale)
    } else {
        String::new()
    };

    let raw_hr: Vec<(f64, f64)> = samples
        .iter()
        .map(|sample| (x_scale.map(sample.elapsed_min), hr_scale.map(sample.heart_rate)))
        .collect();
    let smoothed_hr: Vec<(f64, f64)> = samples
        .iter()
        .map(|sample| (x_scale.map(sample.elapsed_min), hr_scale.map(sample.smoothed_hr)))
        .collect();
    let pace_points: Vec<Option<(f64, f64)>> = samples
        .iter()
        .zip(&paces)
        .map(|(sample, pace)| pace.map(|pace| (x_scale.map(sample.elapsed_min), pace_scale.map(pace))))
        .collect();

    let raw_hr_path = format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-opacity="{:.2}" stroke-width="{:.1}"/>"#,
        build_polyline_path(&raw_hr),
        options.hr_color,
        RAW_HR_OPACITY,
        (options.stroke_width * 0.5).max(0.5)
    );
    let smoothed_hr_path = format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.1}" stroke-linecap="round" stroke-linejoin="round"/>"#,
        build_line_path(&smoothed_hr, options.curve_tension),
        options.hr_color,
        options.stroke_width
    );
    let pace_path = format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.1}" stroke-linecap="round" stroke-linejoin="round"/>"#,
        build_gapped_path(&pace_points),
        options.pace_color,
        options.stroke_width
    );

    let x_axis = build_time_axis(&area, &x_scale);
    let hr_axis = build_value_axis(&area, &hr_scale, area.left, "end", -8.0, options.hr_color, |v| {
        format!("{:.0}", v)
    });
    let pace_axis = build_value_axis(&area, &pace_scale, area.right(), "start", 8.0, options.pace_color, format_pace);

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  {bands}
  {x_axis}
  {hr_axis}
  {pace_axis}
  {raw}
  {pace}
  {smoothed}
  {titles}
</svg>"#,
        w = options.width,
        h = options.height,
        bands = zone_bands,
        x_axis = x_axis,
        hr_axis = hr_axis,
        pace_axis = pace_axis,
        raw = raw_hr_path,
        pace = pace_path,
        smoothed = smoothed_hr_path,
        titles = build_activity_titles(&area, options),
    ))
}

/// Horizontal bars of minutes per zone, in zone-table order.
pub fn render_zone_chart(
    analysis: &Analysis,
    options: &ChartOptions,
) -> Result<String, RenderError> {
    let area = PlotArea::from_options(options)?;
    let totals = &analysis.zone_totals;

    let mut rows: Vec<(&str, &str, f64)> = analysis
        .zone_table
        .zones()
        .iter()
        .map(|zone| (zone.label, zone.color, totals.get(zone.label)))
        .collect();
    if totals.contains(UNKNOWN_ZONE) {
        rows.push((UNKNOWN_ZONE, UNKNOWN_ZONE_COLOR, totals.get(UNKNOWN_ZONE)));
    }

    let label_width = area.width * 0.28;
    let value_width = area.width * 0.14;
    let bar_space = area.width - label_width - value_width;
    if bar_space <= 0.0 {
        return Err(RenderError::InvalidViewport("no room for zone bars".to_string()));
    }

    let max_minutes = rows
        .iter()
        .map(|(_, _, minutes)| *minutes)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);
    let row_height = area.height / rows.len().max(1) as f64;
    let bar_height = row_height * 0.6;
    let font_size = (row_height * 0.28).clamp(11.0, 22.0);

    let mut bars = String::new();
    for (idx, (label, color, minutes)) in rows.iter().enumerate() {
        let row_top = area.top + row_height * idx as f64;
        let bar_y = row_top + (row_height - bar_height) * 0.5;
        let text_y = row_top + row_height * 0.5 + font_size * 0.35;
        let bar_x = area.left + label_width;
        let bar_w = minutes / max_minutes * bar_space;
        bars.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.0}" fill="{}" text-anchor="end">{}</text>
  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>
  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.0}" fill="{}">{:.1} min ({:.0}%)</text>
  "#,
            bar_x - 10.0,
            text_y,
            FONT_FAMILY,
            font_size,
            AXIS_COLOR,
            escape_text(label),
            bar_x,
            bar_y,
            bar_w,
            bar_height,
            color,
            bar_x + bar_w + 8.0,
            text_y,
            FONT_FAMILY,
            font_size,
            AXIS_COLOR,
            minutes,
            totals.share(label) * 100.0
        ));
    }

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <text x="{tx:.2}" y="{ty:.2}" font-family="{font}" font-size="20" fill="{axis}" text-anchor="middle">Time in heart-rate zone</text>
  {bars}
</svg>"#,
        w = options.width,
        h = options.height,
        tx = options.width as f64 / 2.0,
        ty = area.top * 0.6,
        font = FONT_FAMILY,
        axis = AXIS_COLOR,
        bars = bars,
    ))
}

fn hr_bounds(analysis: &Analysis) -> (f64, f64) {
    let values = analysis
        .samples
        .iter()
        .flat_map(|sample| [sample.heart_rate, sample.smoothed_hr]);
    let (lo, hi) = bounds(values).unwrap_or((0.0, analysis.hr_max));
    ((lo - HR_AXIS_MARGIN_BPM).max(0.0), hi + HR_AXIS_MARGIN_BPM)
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
    })
}

fn build_zone_bands(analysis: &Analysis, area: &PlotArea, hr_scale: &Scale) -> String {
    let mut bands = String::new();
    for zone in analysis.zone_table.zones() {
        let zone_lo = (zone.lower_pct / 100.0 * analysis.hr_max).max(hr_scale.lo);
        let zone_hi = (zone.upper_pct / 100.0 * analysis.hr_max).min(hr_scale.hi);
        if zone_hi <= zone_lo {
            continue;
        }
        let y_top = hr_scale.map(zone_hi);
        let y_bottom = hr_scale.map(zone_lo);
        bands.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{:.2}"/>"#,
            area.left,
            y_top,
            area.width,
            y_bottom - y_top,
            zone.color,
            ZONE_BAND_OPACITY
        ));
    }
    bands
}

fn build_time_axis(area: &PlotArea, x_scale: &Scale) -> String {
    let mut axis = format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
        area.left,
        area.bottom(),
        area.right(),
        area.bottom(),
        AXIS_COLOR
    );
    for tick in x_scale.ticks() {
        let x = x_scale.map(tick);
        axis.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="{grid}" stroke-width="1"/><text x="{x:.2}" y="{label_y:.2}" font-family="{font}" font-size="13" fill="{axis}" text-anchor="middle">{label}</text>"#,
            x = x,
            top = area.top,
            bottom = area.bottom(),
            grid = GRID_COLOR,
            label_y = area.bottom() + 20.0,
            font = FONT_FAMILY,
            axis = AXIS_COLOR,
            label = format_elapsed(tick),
        ));
    }
    axis
}

fn build_value_axis(
    area: &PlotArea,
    scale: &Scale,
    x: f64,
    anchor: &str,
    label_offset: f64,
    color: &str,
    format_tick: impl Fn(f64) -> String,
) -> String {
    let mut axis = format!(
        r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
        area.top,
        area.bottom(),
        color,
        x = x
    );
    for tick in scale.ticks() {
        axis.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="13" fill="{}" text-anchor="{}">{}</text>"#,
            x + label_offset,
            scale.map(tick) + 4.0,
            FONT_FAMILY,
            color,
            anchor,
            format_tick(tick)
        ));
    }
    axis
}

fn build_activity_titles(area: &PlotArea, options: &ChartOptions) -> String {
    let mid_y = area.top + area.height / 2.0;
    format!(
        r#"<text x="{cx:.2}" y="{title_y:.2}" font-family="{font}" font-size="20" fill="{axis}" text-anchor="middle">Heart rate and pace</text>
  <text x="{cx:.2}" y="{time_y:.2}" font-family="{font}" font-size="14" fill="{axis}" text-anchor="middle">Elapsed time (min)</text>
  <text x="{hr_x:.2}" y="{mid_y:.2}" font-family="{font}" font-size="14" fill="{hr}" text-anchor="middle" transform="rotate(-90 {hr_x:.2} {mid_y:.2})">Heart rate (bpm)</text>
  <text x="{pace_x:.2}" y="{mid_y:.2}" font-family="{font}" font-size="14" fill="{pace}" text-anchor="middle" transform="rotate(90 {pace_x:.2} {mid_y:.2})">Pace (min/km)</text>"#,
        cx = area.left + area.width / 2.0,
        title_y = area.top * 0.5,
        time_y = area.bottom() + area.top * 0.75,
        hr_x = area.left * 0.25,
        pace_x = area.right() + area.left * 0.75,
        mid_y = mid_y,
        font = FONT_FAMILY,
        axis = AXIS_COLOR,
        hr = options.hr_color,
        pace = options.pace_color,
    )
}

fn build_line_path(coords: &[(f64, f64)], curve_tension: f32) -> String {
    if curve_tension > 0.0 {
        build_smooth_path(coords, curve_tension)
    } else {
        build_polyline_path(coords)
    }
}

fn build_smooth_path(points: &[(f64, f64)], tension: f32) -> String {
    if points.is_empty() {
        return String::new();
    }
    if points.len() == 1 {
        return format!("M {:.2} {:.2}", points[0].0, points[0].1);
    }

    let t = tension.clamp(0.0, 0.5) as f64;
    let mut path = format!("M {:.2} {:.2}", points[0].0, points[0].1);
    for i in 0..points.len() - 1 {
        let p0 = if i > 0 { points[i - 1] } else { points[i] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = if i + 2 < points.len() { points[i + 2] } else { points[i + 1] };
        // Control points only bend vertically so the curve never runs backwards in time.
        let dx = p2.0 - p1.0;
        let cp1x = p1.0 + dx / 3.0;
        let cp1y = p1.1 + (p2.1 - p0.1) * t;
        let cp2x = p2.0 - dx / 3.0;
        let cp2y = p2.1 - (p3.1 - p1.1) * t;
        path.push_str(&format!(
            " C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
            cp1x, cp1y, cp2x, cp2y, p2.0, p2.1
        ));
    }
    path
}

fn build_polyline_path(points: &[(f64, f64)]) -> String {
    points.iter().enumerate().fold(String::new(), |mut s, (i, (x, y))| {
        if i == 0 {
            s.push_str(&format!("M {:.2} {:.2}", x, y));
        } else {
            s.push_str(&format!(" L {:.2} {:.2}", x, y));
        }
        s
    })
}

/// Polyline that lifts the pen over missing points.
fn build_gapped_path(points: &[Option<(f64, f64)>]) -> String {
    let mut path = String::new();
    let mut pen_down = false;
    for point in points {
        match point {
            Some((x, y)) => {
                let command = if pen_down { "L" } else { "M" };
                if !path.is_empty() {
                    path.push(' ');
                }
                path.push_str(&format!("{} {:.2} {:.2}", command, x, y));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    path
}

fn format_elapsed(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0).round().max(0.0) as u64;
    if total_seconds >= 3600 {
        format!(
            "{}:{:02}:{:02}",
            total_seconds / 3600,
            (total_seconds % 3600) / 60,
            total_seconds % 60
        )
    } else {
        format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
    }
}

fn format_pace(pace: f64) -> String {
    let total_seconds = (pace * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
