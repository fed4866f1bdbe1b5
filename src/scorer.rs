use serde::Serialize;

use crate::error::{Error, InvalidInput};
use crate::instrument::{
    ContentItem, Instrument, Question, StressLevel, StressLevelBand, MAX_ANSWER, PSS10,
};

/// 採点結果。得点、段階、説明文、推奨事項をまとめて呼び出し側へ渡す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub score: u32,
    pub max_score: u32,
    pub level: StressLevel,
    pub description: String,
    pub recommendations: Vec<String>,
    pub content: Vec<ContentItem>,
}

impl Assessment {
    pub fn has_stress(&self) -> bool {
        self.level == StressLevel::High
    }
}

/// 回答が 0..=4 に収まっているか検証する
pub(crate) fn raw_answer(question: &Question, value: i32) -> Result<u8, InvalidInput> {
    u8::try_from(value)
        .ok()
        .filter(|raw| *raw <= MAX_ANSWER)
        .ok_or(InvalidInput::AnswerOutOfRange {
            question: question.id,
            value,
        })
}

/// 設問に対する 1 回答の寄与点。逆転項目は 4 - 回答 とする。
pub fn contribution(question: &Question, value: i32) -> Result<u32, InvalidInput> {
    let raw = raw_answer(question, value)?;
    Ok(match question.is_reversed {
        true => u32::from(MAX_ANSWER - raw),
        false => u32::from(raw),
    })
}

/// 質問票に対する採点器。状態を持たず、何度呼んでも同じ結果を返す。
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    instrument: &'a Instrument,
}

impl Default for Scorer<'static> {
    fn default() -> Self {
        Self { instrument: &PSS10 }
    }
}

impl<'a> Scorer<'a> {
    pub fn new(instrument: &'a Instrument) -> Self {
        Self { instrument }
    }

    pub fn instrument(&self) -> &'a Instrument {
        self.instrument
    }

    /// 合計点数方式
    ///
    /// 設問順に回答を走査し、逆転項目は回答を反転させてから足し合わせる。
    /// 回答数が設問数と一致しない場合、または 0..=4 以外の回答がある場合は
    /// 丸めや切り捨てをせずに `InvalidInput` を返す。
    pub fn score(&self, answers: &[i32]) -> Result<u32, Error> {
        let questions = self.instrument.questions();
        if answers.len() != questions.len() {
            return Err(InvalidInput::AnswerCount {
                expected: questions.len(),
                actual: answers.len(),
            }
            .into());
        }
        questions
            .iter()
            .zip(answers)
            .map(|(question, &value)| contribution(question, value).map_err(Error::from))
            .sum()
    }

    /// 得点から段階を判定する
    ///
    /// PSS-10 では 13 点以下が Low、14〜26 点が Moderate、27 点以上が High。
    /// 境界はそれぞれ記載された帯に含まれる。
    pub fn classify(&self, score: u32) -> Result<&'a StressLevelBand, Error> {
        let max = self.instrument.max_score();
        self.instrument
            .bands()
            .iter()
            .find(|band| score <= band.upper)
            .filter(|_| score <= max)
            .ok_or_else(|| InvalidInput::ScoreOutOfRange { score, max }.into())
    }

    pub fn score_and_classify(
        &self,
        answers: &[i32],
    ) -> Result<(u32, &'a StressLevelBand), Error> {
        let score = self.score(answers)?;
        Ok((score, self.classify(score)?))
    }

    pub fn assess(&self, answers: &[i32]) -> Result<Assessment, Error> {
        let (score, band) = self.score_and_classify(answers)?;
        Ok(Assessment {
            score,
            max_score: self.instrument.max_score(),
            level: band.level,
            description: band.description.clone(),
            recommendations: band.recommendations.clone(),
            content: band.content.clone(),
        })
    }
}
