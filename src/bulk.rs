use std::io::{Read, Write};

use log::debug;
use serde::Serialize;

use crate::error::Error;
use crate::instrument::StressLevel;
use crate::scorer::Scorer;

/// 一括採点の出力行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredRow {
    pub id: String,
    pub score: u32,
    pub level: StressLevel,
}

/// 回答者 ID と設問順の回答を 1 行とする CSV を読む。先頭行はヘッダとして読み飛ばす。
///
/// 読めない行はその行だけがエラーになり、後続の行は引き続き読まれる。
pub fn read_bulk<R: Read>(
    reader: R,
) -> impl Iterator<Item = Result<(String, Vec<i32>), Error>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records()
        .map(|record| {
            record
                .map_err(Error::from)
                .and_then(|record| parse_record(&record))
        })
}

fn parse_record(record: &csv::StringRecord) -> Result<(String, Vec<i32>), Error> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let id = match record.get(0) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return Err(Error::Record {
                line,
                message: "missing respondent id".to_string(),
            })
        }
    };
    let answers = record
        .iter()
        .skip(1)
        .map(|field| {
            field.parse::<i32>().map_err(|_| Error::Record {
                line,
                message: format!("answer '{}' for {} is not an integer", field, id),
            })
        })
        .collect::<Result<Vec<i32>, Error>>()?;
    debug!("read {} answers for {}", answers.len(), id);
    Ok((id, answers))
}

/// 1 行分を採点する
pub fn score_row(scorer: &Scorer, id: String, answers: &[i32]) -> Result<ScoredRow, Error> {
    let (score, band) = scorer.score_and_classify(answers)?;
    Ok(ScoredRow {
        id,
        score,
        level: band.level,
    })
}

/// `id,score,level` 形式で書き出す
pub fn write_results<'r, W: Write>(
    writer: W,
    rows: impl IntoIterator<Item = &'r ScoredRow>,
) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
