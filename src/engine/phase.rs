use crate::model::Side;

/// Section of the run log currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Init,
    Reference,
    Test,
    Pass1,
    Pass2,
    Pass3,
}

impl Phase {
    /// Section headers in the order they are checked.
    pub const HEADERS: &'static [(&'static str, Phase)] = &[
        ("Loading reference run", Phase::Reference),
        ("Loading test run", Phase::Test),
        ("Pass 1: Establish common time-frame", Phase::Pass1),
        ("Pass 2: Correlate system tracks", Phase::Pass2),
        ("Pass 3: Compare system track contents", Phase::Pass3),
    ];

    /// The last section header contained in `line`, if any.
    pub fn from_header(line: &str) -> Option<Phase> {
        Phase::HEADERS.iter().filter(|(header, _)| line.contains(header)).map(|(_, phase)| *phase).last()
    }

    /// Dataset that metadata lines belong to in this phase.
    pub fn side(self) -> Option<Side> {
        match self {
            Phase::Reference => Some(Side::Reference),
            Phase::Test => Some(Side::Test),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_map_to_phases() {
        assert_eq!(Phase::from_header("=== Loading reference run ==="), Some(Phase::Reference));
        assert_eq!(Phase::from_header("Loading test run: /data/tst.rec"), Some(Phase::Test));
        assert_eq!(Phase::from_header("Pass 2: Correlate system tracks"), Some(Phase::Pass2));
        assert_eq!(Phase::from_header("Server Identification: 0x1234"), None);
    }

    #[test]
    fn only_loading_phases_own_a_dataset() {
        assert_eq!(Phase::Reference.side(), Some(Side::Reference));
        assert_eq!(Phase::Test.side(), Some(Side::Test));
        for phase in [Phase::Init, Phase::Pass1, Phase::Pass2, Phase::Pass3] {
            assert_eq!(phase.side(), None);
        }
    }
}
