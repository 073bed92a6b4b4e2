pub mod engine;
pub mod judge;
pub mod session;

pub use self::engine::Ranker;
pub use self::judge::{FnJudge, Judge, NoopObserver, RankingObserver, RuleJudge};
pub use self::session::{Comparison, SearchWindow, SessionState, Verdict};
