use clap::ValueEnum;

/// The three AI scenarios on the demo page. Only `Expert` has a live
/// interactive demo; the other two render a static placeholder panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    Hunter,
    Guardian,
    Expert,
}

impl Scenario {
    pub fn title(&self) -> &'static str {
        match self {
            Scenario::Hunter => "智能获客 (Hunter)",
            Scenario::Guardian => "市场安抚 (Guardian)",
            Scenario::Expert => "业务专家 (Expert)",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Scenario::Hunter => "基于高净值人群画像，自动生成拓客名单与破冰话术，提升转化率。",
            Scenario::Guardian => "市场剧烈波动时，自动生成个性化安抚信与持仓分析报告，稳定客户情绪。",
            Scenario::Expert => "7x24 小时在线的投委会专家，实时解答复杂税务、架构与标的问题。",
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Scenario::Expert)
    }

    /// Placeholder shown for the scenarios without a live demo.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Scenario::Hunter => Some("Hunter Mode Dashboard"),
            Scenario::Guardian => Some("Guardian Mode Alert System"),
            Scenario::Expert => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_expert_is_interactive() {
        assert!(Scenario::Expert.is_interactive());
        assert!(!Scenario::Hunter.is_interactive());
        assert!(!Scenario::Guardian.is_interactive());
    }

    #[test]
    fn interactive_scenario_has_no_placeholder() {
        assert!(Scenario::Expert.placeholder().is_none());
        assert!(Scenario::Hunter.placeholder().is_some());
        assert!(Scenario::Guardian.placeholder().is_some());
    }
}
