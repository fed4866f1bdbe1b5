use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::instrument::StressLevel;
use crate::scorer::Scorer;

/// 保存済みの受検結果 1 件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub taken_on: NaiveDate,
    pub score: u32,
}

impl AssessmentRecord {
    pub fn new(taken_on: NaiveDate, score: u32) -> Self {
        Self { taken_on, score }
    }

    pub fn level(&self, scorer: &Scorer) -> Result<StressLevel, Error> {
        Ok(scorer.classify(self.score)?.level)
    }
}

/// 受検履歴の推移。改善量は初回 - 最新 で、正の値はストレスが下がったことを表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub first: AssessmentRecord,
    pub latest: AssessmentRecord,
    pub improvement: i64,
    /// 初回得点に対する改善率 (%)。初回が 0 点の場合は算出しない。
    pub improvement_percentage: Option<i64>,
}

fn chronological(records: &[AssessmentRecord]) -> Vec<&AssessmentRecord> {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|record| record.taken_on);
    sorted
}

impl Trend {
    /// 受検日の順序に関わらず、最も古い記録と最も新しい記録を比較する
    pub fn from_records(records: &[AssessmentRecord]) -> Option<Trend> {
        let sorted = chronological(records);
        let first = *sorted.first()?;
        let latest = *sorted.last()?;
        let improvement = i64::from(first.score) - i64::from(latest.score);
        let improvement_percentage = match first.score {
            0 => None,
            // 0.5 は正の方向へ丸める
            base => Some((improvement as f64 * 100.0 / f64::from(base) + 0.5).floor() as i64),
        };
        Some(Trend {
            first: first.clone(),
            latest: latest.clone(),
            improvement,
            improvement_percentage,
        })
    }

    pub fn is_improving(&self) -> bool {
        self.improvement > 0
    }
}

/// 各記録の直前の記録からの変化量 (直前 - 当該)。新しい順に返し、最も古い記録は 0。
pub fn changes(records: &[AssessmentRecord]) -> Vec<(AssessmentRecord, i64)> {
    let sorted = chronological(records);
    let mut result = sorted
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let change = match index {
                0 => 0,
                _ => i64::from(sorted[index - 1].score) - i64::from(record.score),
            };
            ((*record).clone(), change)
        })
        .collect::<Vec<_>>();
    result.reverse();
    result
}
