use crate::config::SymbolConfig;
use crate::layout::{PlacedPin, SymbolLayout};

pub const FORMAT_VERSION: u32 = 20211014;
pub const GENERATOR: &str = "pinsym";

const FONT: &str = "(effects (font (size 1.27 1.27)))";
const HIDDEN_FONT: &str = "(effects (font (size 1.27 1.27)) hide)";
/// Distance between the body edge and the first property field.
const FIELD_OFFSET: f64 = 2.54;
const STROKE_WIDTH: f64 = 0.254;

/// Renders a laid-out symbol as a `.kicad_sym` library document.
pub struct SymbolExporter<'a> {
    config: &'a SymbolConfig,
}

impl<'a> SymbolExporter<'a> {
    pub fn new(config: &'a SymbolConfig) -> Self {
        Self { config }
    }

    pub fn export(&self, layout: &SymbolLayout) -> String {
        let name = escape(&self.config.symbol_name);
        let hh = layout.half_height;
        let hw = layout.half_width;

        let mut out = format!(
            "(kicad_symbol_lib (version {}) (generator \"{}\")\n",
            FORMAT_VERSION, GENERATOR
        );
        out.push_str(&format!("  (symbol \"{}\" (in_bom yes) (on_board yes)\n", name));
        out.push_str(&self.property(0, "Reference", &self.config.reference, hh + FIELD_OFFSET, false));
        out.push_str(&self.property(1, "Value", &self.config.symbol_name, hh + 2.0 * FIELD_OFFSET, false));
        out.push_str(&self.property(2, "Footprint", &self.config.footprint, -(hh + FIELD_OFFSET), true));
        out.push_str(&self.property(3, "Datasheet", &self.config.datasheet, 0.0, true));

        out.push_str(&format!("    (symbol \"{}_1_1\"\n", name));
        for placed in &layout.pins {
            out.push_str(&self.pin(placed));
        }
        out.push_str(&format!(
            "      (rectangle (start {} {}) (end {} {})\n",
            mm(-hw),
            mm(hh),
            mm(hw),
            mm(-hh)
        ));
        out.push_str(&format!(
            "        (stroke (width {}) (type default) (color 0 0 0 0))\n",
            mm(STROKE_WIDTH)
        ));
        out.push_str("        (fill (type background)))\n");
        out.push_str("    )\n");
        out.push_str("  )\n");
        out.push_str(")\n");
        out
    }

    fn property(&self, id: u32, key: &str, value: &str, y: f64, hidden: bool) -> String {
        format!(
            "    (property \"{}\" \"{}\" (id {}) (at 0 {} 0) {})\n",
            key,
            escape(value),
            id,
            mm(y),
            if hidden { HIDDEN_FONT } else { FONT }
        )
    }

    fn pin(&self, placed: &PlacedPin) -> String {
        format!(
            concat!(
                "      (pin {} line (at {} {} {}) (length {})\n",
                "        (name \"{}\" {})\n",
                "        (number \"{}\" {})\n",
                "      )\n"
            ),
            placed.pin.pin_type,
            mm(placed.x),
            mm(placed.y),
            mm(placed.rotation),
            mm(self.config.pin_length),
            escape(&placed.pin.name),
            FONT,
            escape(&placed.pin.number),
            FONT
        )
    }
}

/// Format a coordinate with at most four decimals and no trailing zeros.
pub fn mm(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        // avoids "-0"
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

/// Quote-safe string for S-expression atoms.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
