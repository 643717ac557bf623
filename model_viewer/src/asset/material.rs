/// Material definition: shader path and named parameters

use crate::frame::DrawStep;

/// File name without directory or extension
pub fn short_name(path: &str) -> &str {
    let file = path.rsplit(['\\', '/']).next().unwrap_or(path);
    match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    /// Material shader definition path (e.g. `...\\P_Metal[DSB]_Alp.mtd`)
    pub mtd: String,
    /// Parameter name/value pairs in declaration order
    pub params: Vec<(String, String)>,
}

impl MaterialDef {
    pub fn new(mtd: impl Into<String>) -> Self {
        Self { mtd: mtd.into(), ..Default::default() }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Short material shader name used by the alpha heuristics
    pub fn short_mtd_name(&self) -> &str {
        short_name(&self.mtd)
    }

    /// Pass this material renders in.
    ///
    /// `AlphaEdge` when the short name ends with `_Alp` or contains `_Edge`,
    /// `_Decal`, `_Cloth`, `_al` or `BlendOpacity`.
    pub fn draw_step(&self) -> DrawStep {
        let name = self.short_mtd_name();
        let alpha = name.ends_with("_Alp")
            || ["_Edge", "_Decal", "_Cloth", "_al", "BlendOpacity"]
                .iter()
                .any(|marker| name.contains(marker));
        if alpha { DrawStep::AlphaEdge } else { DrawStep::Opaque }
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
