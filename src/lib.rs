//! Perceived Stress Scale (PSS-10) の採点エンジン
//!
//! 回答セットを設問定義に照らして検証し、逆転項目を反転させて合計点を出し、
//! 合計点を Low / Moderate / High の 3 段階に分類する。

pub mod bulk;
pub mod error;
pub mod history;
pub mod instrument;
pub mod scorer;
pub mod sheet;

pub use bulk::{read_bulk, write_results, ScoredRow};
pub use error::{Error, InvalidInput};
pub use history::{AssessmentRecord, Trend};
pub use instrument::{
    ContentItem, ContentType, Instrument, Question, ResponseOption, StressLevel, StressLevelBand,
    PSS10,
};
pub use scorer::{Assessment, Scorer};
pub use sheet::AnswerSheet;

/// PSS-10 で採点する
pub fn score(answers: &[i32]) -> Result<u32, Error> {
    Scorer::default().score(answers)
}

/// PSS-10 の得点帯を判定する
pub fn classify(score: u32) -> Result<&'static StressLevelBand, Error> {
    Scorer::default().classify(score)
}

pub fn score_and_classify(answers: &[i32]) -> Result<(u32, &'static StressLevelBand), Error> {
    Scorer::default().score_and_classify(answers)
}
