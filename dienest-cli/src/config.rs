use serde::{Deserialize, Serialize};

use dienest::io::svg::SvgDrawOptions;
use dienest::util::EngineConfig;

/// Configuration of the command line front-end
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct CliConfig {
    /// Configuration of the nesting engine
    #[serde(default)]
    pub engine: EngineConfig,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}
