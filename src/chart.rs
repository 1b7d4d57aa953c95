use serde::Serialize;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 220.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 34.0;
const MARGIN_BOTTOM: f64 = 30.0;
const BAR_FILL: &str = "#1f77b4";
const TICK_STEP: f64 = 20.0;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
    pub y_max: f64,
}

impl BarChart {
    /// Two bars, current percentage next to the target, with headroom above the taller one.
    pub fn attendance_vs_target(current_percent: f64, target: f64) -> Self {
        BarChart {
            title: "Attendance vs Target".to_string(),
            bars: vec![
                Bar {
                    label: "Current %".to_string(),
                    value: current_percent,
                },
                Bar {
                    label: "Target %".to_string(),
                    value: target,
                },
            ],
            y_max: f64::max(100.0, target + 10.0),
        }
    }

    fn plot_height(&self) -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn y_for(&self, value: f64) -> f64 {
        let clamped = value.clamp(0.0, self.y_max);
        MARGIN_TOP + self.plot_height() * (1.0 - clamped / self.y_max)
    }

    pub fn render_svg(&self) -> String {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let baseline = self.y_for(0.0);
        let mut svg = String::new();

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Arial, sans-serif" font-size="11">"#,
            w = WIDTH,
            h = HEIGHT
        ));
        svg.push_str(&format!(
            r#"<rect width="{}" height="{}" fill="white"/>"#,
            WIDTH, HEIGHT
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="20" text-anchor="middle" font-size="13">{}</text>"#,
            MARGIN_LEFT + plot_width / 2.0,
            escape_xml(&self.title)
        ));

        // y axis ticks
        let mut tick = 0.0;
        while tick <= self.y_max {
            let y = self.y_for(tick);
            svg.push_str(&format!(
                r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="black" stroke-width="0.6"/>"#,
                MARGIN_LEFT - 4.0,
                MARGIN_LEFT
            ));
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
                MARGIN_LEFT - 6.0,
                y + 4.0,
                tick
            ));
            tick += TICK_STEP;
        }

        if !self.bars.is_empty() {
            let slot = plot_width / self.bars.len() as f64;
            let bar_width = slot * 0.8;

            for (i, bar) in self.bars.iter().enumerate() {
                let center = MARGIN_LEFT + slot * (i as f64 + 0.5);
                let top = self.y_for(bar.value);
                svg.push_str(&format!(
                    r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                    center - bar_width / 2.0,
                    top,
                    bar_width,
                    baseline - top,
                    BAR_FILL
                ));
                svg.push_str(&format!(
                    r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{:.1}%</text>"#,
                    center,
                    (top - 4.0).max(MARGIN_TOP - 2.0),
                    bar.value
                ));
                svg.push_str(&format!(
                    r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
                    center,
                    baseline + 16.0,
                    escape_xml(&bar.label)
                ));
            }
        }

        // axes
        svg.push_str(&format!(
            r#"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="black"/>"#,
            l = MARGIN_LEFT,
            t = MARGIN_TOP,
            b = baseline
        ));
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{b:.1}" x2="{:.1}" y2="{b:.1}" stroke="black"/>"#,
            MARGIN_LEFT,
            WIDTH - MARGIN_RIGHT,
            b = baseline
        ));

        svg.push_str("</svg>");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
