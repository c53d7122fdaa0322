use std::fs;
use std::path::PathBuf;

use crate::config::{GeneratorConfig, LayoutStrategy, SymbolConfig};
use crate::error::{AppError, Result};
use crate::kicad::SymbolExporter;
use crate::layout::{self, Side, SideAssignment, SymbolLayout};
use crate::pins::{self, RawPin};

/// A rendered symbol document and how its pins were split.
#[derive(Debug, Clone)]
pub struct RenderedSymbol {
    pub document: String,
    pub layout: SymbolLayout,
    /// Group names per side. Empty for the by-type strategy.
    pub sides: SideAssignment,
}

impl RenderedSymbol {
    pub fn pin_count(&self) -> usize {
        self.layout.pins.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub pin_count: usize,
    pub left_pins: usize,
    pub right_pins: usize,
    pub left_groups: Vec<String>,
    pub right_groups: Vec<String>,
}

/// Classify, lay out and serialize `raw` without touching the filesystem.
pub fn render(raw: &[RawPin], config: &SymbolConfig) -> RenderedSymbol {
    let classified = pins::classify_pins(raw, &config.rules, config.default_type);

    let (layout, sides) = match config.strategy {
        LayoutStrategy::Grouped => {
            let groups = pins::group_pins(classified);
            let sides = layout::balance(&groups);
            log::info!(
                "Left groups: [{}] ({} pins), right groups: [{}] ({} pins)",
                sides.left.join(", "),
                sides.left_pins(&groups),
                sides.right.join(", "),
                sides.right_pins(&groups)
            );
            (layout::layout_grouped(&groups, &sides, config), sides)
        }
        LayoutStrategy::ByType => {
            (layout::layout_by_type(&classified, config), SideAssignment::default())
        }
    };

    let document = SymbolExporter::new(config).export(&layout);
    RenderedSymbol {
        document,
        layout,
        sides,
    }
}

/// Run the whole pipeline: read the pin table, render, then write the
/// library. The output file is only created once rendering has succeeded.
pub fn generate(config: &GeneratorConfig) -> Result<GenerateReport> {
    config.symbol.validate()?;
    let delimiter = config.symbol.delimiter_byte()?;

    let raw = pins::load_pins(&config.input, delimiter)?;
    let rendered = render(&raw, &config.symbol);

    fs::write(&config.output, rendered.document.as_bytes()).map_err(|source| AppError::Write {
        path: config.output.clone(),
        source,
    })?;
    log::info!(
        "Wrote symbol {} with {} pins to {}",
        config.symbol.symbol_name,
        rendered.pin_count(),
        config.output.display()
    );

    Ok(GenerateReport {
        output: config.output.clone(),
        pin_count: rendered.pin_count(),
        left_pins: rendered.layout.side(Side::Left).count(),
        right_pins: rendered.layout.side(Side::Right).count(),
        left_groups: rendered.sides.left,
        right_groups: rendered.sides.right,
    })
}
