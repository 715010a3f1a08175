use std::time::Duration;

use super::CueWriter;
use crate::caption::Cue;
use crate::config::{FcpxmlConfig, OutputFormat};
use crate::error::Result;

/// Timeline frame rate; every offset and duration is snapped to this grid
pub const FRAME_RATE: u64 = 30;

const FCPXML_VERSION: &str = "1.8";
const FORMAT_ID: &str = "r1";
const TITLE_EFFECT_ID: &str = "r2";
const TEXT_STYLE_ID: &str = "ts1";
const TITLE_EFFECT_UID: &str =
    ".../Titles.localized/Bumper:Opener.localized/Basic Title.localized/Basic Title.moti";
const LINE_BREAK_ENTITY: &str = "&#xA;";

/// Final Cut Pro XML writer: a single gap on the spine with one connected title per cue
pub struct FcpxmlWriter {
    config: FcpxmlConfig,
    project_name: String,
}

impl FcpxmlWriter {
    pub fn new(config: FcpxmlConfig, project_name: String) -> Self {
        Self { config, project_name }
    }

    fn render_title(&self, cue: &Cue, with_style_def: bool) -> String {
        let text = cue
            .lines
            .iter()
            .map(|line| escape_xml(line))
            .collect::<Vec<_>>()
            .join(LINE_BREAK_ENTITY);
        let name = escape_xml(cue.lines.first().map(String::as_str).unwrap_or_default());

        let mut title = String::new();
        title.push_str(&format!(
            "                            <title ref=\"{}\" lane=\"1\" offset=\"{}\" duration=\"{}\" name=\"{}\">\n",
            TITLE_EFFECT_ID,
            rational_time(cue.start),
            frames_to_rational(title_frames(cue)),
            name
        ));
        title.push_str("                                <text>\n");
        title.push_str(&format!(
            "                                    <text-style ref=\"{}\">{}</text-style>\n",
            TEXT_STYLE_ID, text
        ));
        title.push_str("                                </text>\n");
        if with_style_def {
            title.push_str(&format!(
                "                                <text-style-def id=\"{}\">\n",
                TEXT_STYLE_ID
            ));
            title.push_str(&format!(
                "                                    <text-style font=\"{}\" fontSize=\"{}\" fontColor=\"1 1 1 1\" alignment=\"center\"/>\n",
                escape_xml(&self.config.font),
                self.config.font_size
            ));
            title.push_str("                                </text-style-def>\n");
        }
        title.push_str("                            </title>\n");
        title
    }
}

impl CueWriter for FcpxmlWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Fcpxml
    }

    fn render(&self, cues: &[Cue]) -> Result<String> {
        let total_frames = cues
            .iter()
            .map(|cue| to_frames(cue.start) + title_frames(cue))
            .max()
            .unwrap_or(0);
        let total = frames_to_rational(total_frames);

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<!DOCTYPE fcpxml>\n\n");
        xml.push_str(&format!("<fcpxml version=\"{}\">\n", FCPXML_VERSION));
        xml.push_str("    <resources>\n");
        xml.push_str(&format!(
            "        <format id=\"{}\" name=\"FFVideoFormat{}p{}\" frameDuration=\"1/{}s\" width=\"{}\" height=\"{}\"/>\n",
            FORMAT_ID, self.config.height, FRAME_RATE, FRAME_RATE, self.config.width, self.config.height
        ));
        xml.push_str(&format!(
            "        <effect id=\"{}\" name=\"Basic Title\" uid=\"{}\"/>\n",
            TITLE_EFFECT_ID, TITLE_EFFECT_UID
        ));
        xml.push_str("    </resources>\n");
        xml.push_str("    <library>\n");
        xml.push_str(&format!(
            "        <event name=\"{}\">\n",
            escape_xml(&self.config.event_name)
        ));
        xml.push_str(&format!(
            "            <project name=\"{}\">\n",
            escape_xml(&self.project_name)
        ));
        xml.push_str(&format!(
            "                <sequence format=\"{}\" duration=\"{}\" tcStart=\"0s\" tcFormat=\"NDF\">\n",
            FORMAT_ID, total
        ));
        xml.push_str("                    <spine>\n");
        xml.push_str(&format!(
            "                        <gap name=\"Gap\" offset=\"0s\" duration=\"{}\" start=\"0s\">\n",
            total
        ));
        for (i, cue) in cues.iter().enumerate() {
            xml.push_str(&self.render_title(cue, i == 0));
        }
        xml.push_str("                        </gap>\n");
        xml.push_str("                    </spine>\n");
        xml.push_str("                </sequence>\n");
        xml.push_str("            </project>\n");
        xml.push_str("        </event>\n");
        xml.push_str("    </library>\n");
        xml.push_str("</fcpxml>\n");

        Ok(xml)
    }
}

/// Number of whole frames closest to `time`
pub fn to_frames(time: Duration) -> u64 {
    (time.as_secs_f64() * FRAME_RATE as f64).round() as u64
}

/// Title length in frames; a cue never collapses to an empty title
fn title_frames(cue: &Cue) -> u64 {
    to_frames(cue.duration()).max(1)
}

/// FCPXML rational time (`N/30s`) for the frame closest to `time`
pub fn rational_time(time: Duration) -> String {
    frames_to_rational(to_frames(time))
}

fn frames_to_rational(frames: u64) -> String {
    if frames == 0 {
        "0s".to_string()
    } else {
        format!("{}/{}s", frames, FRAME_RATE)
    }
}

/// Escape the characters that are unsafe in XML text and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
