//! Analytical tasks and their fixed request profiles.

use alpha_gateway::Schema;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::model::{AlphaIntel, RiskRating, Swot};
use super::{prompts, schemas};
use crate::slots::Slot;

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// India Standard Time, UTC+05:30.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// How a bottom-up query should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BottomUpMode {
    /// A company or ticker.
    #[default]
    Entity,
    /// A headline whose market impact should be assessed.
    NewsImpact,
}

/// Scheduled desk bulletins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulletinKind {
    PreMarket,
    SwingSignal,
    FundamentalPick,
    MarketSnapshot,
    PostMarket,
}

impl BulletinKind {
    pub const ALL: [BulletinKind; 5] = [
        BulletinKind::PreMarket,
        BulletinKind::SwingSignal,
        BulletinKind::FundamentalPick,
        BulletinKind::MarketSnapshot,
        BulletinKind::PostMarket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreMarket => "pre-market",
            Self::SwingSignal => "swing-signal",
            Self::FundamentalPick => "fundamental-pick",
            Self::MarketSnapshot => "market-snapshot",
            Self::PostMarket => "post-market",
        }
    }

    /// Bulletins scheduled for the wall-clock minute of `at`, read in IST.
    ///
    /// Weekdays only: pre-market 08:45, swing signal 10:00, fundamental pick
    /// 12:00, post-market 16:30, and a snapshot every quarter hour while the
    /// market is open (09:15 through 15:30).
    pub fn due_at(at: DateTime<FixedOffset>) -> Vec<BulletinKind> {
        let local = at.with_timezone(&ist());
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return Vec::new();
        }

        let minute_of_day = local.hour() * 60 + local.minute();
        let mut due = Vec::new();
        match minute_of_day {
            525 => due.push(Self::PreMarket),
            600 => due.push(Self::SwingSignal),
            720 => due.push(Self::FundamentalPick),
            990 => due.push(Self::PostMarket),
            _ => {}
        }
        if (555..=930).contains(&minute_of_day) && local.minute() % 15 == 0 {
            due.push(Self::MarketSnapshot);
        }
        due
    }

    fn max_output_tokens(&self) -> u32 {
        match self {
            Self::PreMarket | Self::PostMarket => 800,
            Self::SwingSignal | Self::FundamentalPick => 700,
            Self::MarketSnapshot => 400,
        }
    }
}

/// Which configured model a task runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Flash,
    Pro,
}

/// What the reply body is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    Narrative,
    IpoListings,
    TopDown,
}

/// One analytical request with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchTask {
    MorningBrief { date: NaiveDate },
    IpoScan,
    IpoDeepDive { company: String },
    TopDown,
    CompanyDeepDive { company: String },
    BottomUp { query: String, mode: BottomUpMode },
    Bulletin { kind: BulletinKind, issued_at: DateTime<FixedOffset> },
}

const IPO_SCAN_FAILURE: &str = "IPO reasoning node offline.";
const TOP_DOWN_FAILURE: &str = "Macro reasoning node offline.";
const BOTTOM_UP_FAILURE: &str = "Bottom-up reasoning node offline.";
const BULLETIN_FAILURE: &str = "Bulletin generation unavailable.";

impl ResearchTask {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MorningBrief { .. } => "morning_brief",
            Self::IpoScan => "ipo_scan",
            Self::IpoDeepDive { .. } => "ipo_deep_dive",
            Self::TopDown => "top_down",
            Self::CompanyDeepDive { .. } => "company_deep_dive",
            Self::BottomUp { .. } => "bottom_up",
            Self::Bulletin { .. } => "bulletin",
        }
    }

    /// Panel the result is shown in.
    pub fn slot(&self) -> Slot {
        match self {
            Self::MorningBrief { .. } => Slot::Brief,
            Self::IpoScan => Slot::IpoScan,
            Self::IpoDeepDive { .. } => Slot::IpoProspectus,
            Self::TopDown => Slot::TopDown,
            Self::CompanyDeepDive { .. } => Slot::Audit,
            Self::BottomUp { .. } => Slot::BottomUp,
            Self::Bulletin { .. } => Slot::Bulletin,
        }
    }

    pub fn tier(&self) -> ModelTier {
        match self {
            Self::MorningBrief { .. } | Self::IpoScan | Self::Bulletin { .. } => ModelTier::Flash,
            _ => ModelTier::Pro,
        }
    }

    /// Bulletins are template fills; everything else cites the web.
    pub fn grounding(&self) -> bool {
        !matches!(self, Self::Bulletin { .. })
    }

    pub fn thinking_budget(&self) -> Option<u32> {
        match self {
            Self::IpoDeepDive { .. } | Self::CompanyDeepDive { .. } | Self::BottomUp { .. } => {
                Some(15_000)
            }
            Self::TopDown => Some(10_000),
            _ => None,
        }
    }

    pub fn max_output_tokens(&self) -> Option<u32> {
        match self {
            Self::Bulletin { kind, .. } => Some(kind.max_output_tokens()),
            _ => None,
        }
    }

    pub fn reply_shape(&self) -> ReplyShape {
        match self {
            Self::IpoScan => ReplyShape::IpoListings,
            Self::TopDown => ReplyShape::TopDown,
            _ => ReplyShape::Narrative,
        }
    }

    pub fn schema(&self) -> Option<Schema> {
        match self.reply_shape() {
            ReplyShape::Narrative => None,
            ReplyShape::IpoListings => Some(schemas::ipo_scan()),
            ReplyShape::TopDown => Some(schemas::top_down()),
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Self::MorningBrief { date } => prompts::morning_brief(*date),
            Self::IpoScan => prompts::IPO_SCAN.to_string(),
            Self::IpoDeepDive { company } => prompts::ipo_deep_dive(company),
            Self::TopDown => prompts::TOP_DOWN.to_string(),
            Self::CompanyDeepDive { company } => prompts::company_deep_dive(company),
            Self::BottomUp { query, mode } => prompts::bottom_up(query, *mode),
            Self::Bulletin { kind, issued_at } => prompts::bulletin(*kind, *issued_at),
        }
    }

    /// Title given to citations whose web reference has none.
    pub fn citation_label(&self) -> &'static str {
        match self {
            Self::MorningBrief { .. } => "Grounding Source",
            Self::IpoScan => "IPO Intel",
            Self::IpoDeepDive { .. } => "Prospectus Source",
            Self::TopDown => "Research Source",
            Self::CompanyDeepDive { .. } => "Audit Intel",
            Self::BottomUp { .. } => "Impact Source",
            Self::Bulletin { .. } => "Bulletin Source",
        }
    }

    /// Narrative shown when the call fails or the reply is unusable.
    pub fn failure_text(&self) -> String {
        match self {
            Self::MorningBrief { .. } => {
                "Morning brief node restricted. Proceed with local structural bias.".to_string()
            }
            Self::IpoScan => IPO_SCAN_FAILURE.to_string(),
            Self::IpoDeepDive { .. } => "Institutional audit failed for this entity.".to_string(),
            Self::TopDown => TOP_DOWN_FAILURE.to_string(),
            Self::CompanyDeepDive { company } => format!(
                "Institutional Node Failure: Unable to audit {} at this time due to upstream RPC constraints.",
                company
            ),
            Self::BottomUp { .. } => BOTTOM_UP_FAILURE.to_string(),
            Self::Bulletin { .. } => BULLETIN_FAILURE.to_string(),
        }
    }

    /// Narrative shown when the call succeeded but returned no text.
    pub fn empty_text(&self) -> String {
        match self {
            Self::MorningBrief { .. } => "System standby. Sync required.".to_string(),
            Self::IpoDeepDive { .. } => "Deep dive node standby.".to_string(),
            Self::CompanyDeepDive { .. } => "Report empty. Re-initiate audit.".to_string(),
            _ => self.failure_text(),
        }
    }

    /// Score block attached to successful audits. Always marked simulated:
    /// these values are fixed, not read from the model.
    pub fn simulated_intel(&self) -> Option<AlphaIntel> {
        let (entity, moat_score, swot) = match self {
            Self::CompanyDeepDive { company } => (
                company,
                92,
                swot(
                    &["Market Leadership", "Strong OCF"],
                    &["Input Cost Pressure"],
                    &["International Expansion"],
                    &["Regulatory Changes"],
                ),
            ),
            Self::BottomUp { query, .. } => (
                query,
                88,
                swot(
                    &["Strong Execution"],
                    &["Niche Dependence"],
                    &["M&A Potential"],
                    &["Macro Volatility"],
                ),
            ),
            _ => return None,
        };

        Some(AlphaIntel {
            entity: entity.clone(),
            moat_score,
            risk_rating: RiskRating::Medium,
            swot,
            simulated: true,
        })
    }
}

fn swot(s: &[&str], w: &[&str], o: &[&str], t: &[&str]) -> Swot {
    let owned = |items: &[&str]| items.iter().map(|i| i.to_string()).collect();
    Swot {
        strengths: owned(s),
        weaknesses: owned(w),
        opportunities: owned(o),
        threats: owned(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_structured_tasks_declare_schema() {
        assert!(ResearchTask::IpoScan.schema().is_some());
        assert!(ResearchTask::TopDown.schema().is_some());
        let audit = ResearchTask::CompanyDeepDive { company: "Acme".to_string() };
        assert!(audit.schema().is_none());
    }

    #[test]
    fn test_deep_dive_fallback_names_entity() {
        let task = ResearchTask::CompanyDeepDive { company: "Acme".to_string() };
        assert!(task.failure_text().contains("Acme"));
        assert_eq!(task.empty_text(), "Report empty. Re-initiate audit.");
    }

    #[test]
    fn test_simulated_intel_only_for_audits() {
        let bottom_up = ResearchTask::BottomUp {
            query: "TCS".to_string(),
            mode: BottomUpMode::Entity,
        };
        let intel = bottom_up.simulated_intel().unwrap();
        assert!(intel.simulated);
        assert_eq!(intel.moat_score, 88);
        assert_eq!(intel.entity, "TCS");
        assert!(ResearchTask::TopDown.simulated_intel().is_none());
    }

    #[test]
    fn test_bulletins_are_ungrounded_and_capped() {
        let task = ResearchTask::Bulletin {
            kind: BulletinKind::MarketSnapshot,
            issued_at: Utc::now().with_timezone(&ist()),
        };
        assert!(!task.grounding());
        assert_eq!(task.max_output_tokens(), Some(400));
        assert_eq!(task.tier(), ModelTier::Flash);
    }

    #[test]
    fn test_ist_offset() {
        assert_eq!(ist().local_minus_utc(), 19_800);
    }

    fn ist_at(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        // 2026-01-05 is a Monday.
        ist().with_ymd_and_hms(2026, 1, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_bulletin_schedule_fixed_slots() {
        assert_eq!(BulletinKind::due_at(ist_at(5, 8, 45)), vec![BulletinKind::PreMarket]);
        assert_eq!(
            BulletinKind::due_at(ist_at(6, 10, 0)),
            vec![BulletinKind::SwingSignal, BulletinKind::MarketSnapshot]
        );
        assert_eq!(
            BulletinKind::due_at(ist_at(7, 12, 0)),
            vec![BulletinKind::FundamentalPick, BulletinKind::MarketSnapshot]
        );
        assert_eq!(BulletinKind::due_at(ist_at(9, 16, 30)), vec![BulletinKind::PostMarket]);
        assert!(BulletinKind::due_at(ist_at(5, 8, 46)).is_empty());
    }

    #[test]
    fn test_snapshot_window_edges() {
        assert!(BulletinKind::due_at(ist_at(5, 9, 0)).is_empty());
        assert_eq!(BulletinKind::due_at(ist_at(5, 9, 15)), vec![BulletinKind::MarketSnapshot]);
        assert_eq!(BulletinKind::due_at(ist_at(5, 15, 30)), vec![BulletinKind::MarketSnapshot]);
        assert!(BulletinKind::due_at(ist_at(5, 15, 45)).is_empty());
        assert!(BulletinKind::due_at(ist_at(5, 11, 20)).is_empty());
    }

    #[test]
    fn test_no_bulletins_on_weekends() {
        // 2026-01-10 and 11 are Saturday and Sunday.
        assert!(BulletinKind::due_at(ist_at(10, 8, 45)).is_empty());
        assert!(BulletinKind::due_at(ist_at(11, 9, 15)).is_empty());
    }

    #[test]
    fn test_schedule_reads_utc_input_as_ist() {
        // 03:45 UTC is 09:15 IST.
        let utc = Utc.with_ymd_and_hms(2026, 1, 5, 3, 45, 0).unwrap().fixed_offset();
        assert_eq!(BulletinKind::due_at(utc), vec![BulletinKind::MarketSnapshot]);
    }
}
