use crate::error::{Error, InvalidInput};
use crate::instrument::{Instrument, Question, PSS10};
use crate::scorer::{raw_answer, Assessment, Scorer};

/// 回答用紙。設問ごとに未回答から始まり、1 問ずつ埋めていく。
#[derive(Debug, Clone)]
pub struct AnswerSheet<'a> {
    instrument: &'a Instrument,
    values: Vec<Option<u8>>,
}

impl Default for AnswerSheet<'static> {
    fn default() -> Self {
        Self::new(&PSS10)
    }
}

impl<'a> AnswerSheet<'a> {
    pub fn new(instrument: &'a Instrument) -> Self {
        Self {
            instrument,
            values: vec![None; instrument.len()],
        }
    }

    /// 回答を格納する
    /// 0〜4 の回答番号以外は認めない。
    pub fn push(&mut self, value: i32) -> Result<(), Error> {
        let offset = self
            .values
            .iter()
            .position(Option::is_none)
            .ok_or(InvalidInput::AlreadyComplete)?;
        let question = &self.instrument.questions()[offset];
        self.values[offset] = Some(raw_answer(question, value)?);
        Ok(())
    }

    /// 設問番号を指定して回答を格納する。回答済みの場合は上書きする。
    pub fn insert(&mut self, question_id: u32, value: i32) -> Result<(), Error> {
        let offset = self
            .instrument
            .position(question_id)
            .ok_or(InvalidInput::UnknownQuestion(question_id))?;
        let question = &self.instrument.questions()[offset];
        self.values[offset] = Some(raw_answer(question, value)?);
        Ok(())
    }

    pub fn answered(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// 最初の未回答の設問
    pub fn next_question(&self) -> Option<&'a Question> {
        let instrument = self.instrument;
        self.values
            .iter()
            .position(Option::is_none)
            .and_then(|offset| instrument.get(offset))
    }

    /// 全設問に回答済みであれば採点用の回答セットを返す
    pub fn answers(&self) -> Result<Vec<i32>, Error> {
        self.instrument
            .questions()
            .iter()
            .zip(&self.values)
            .map(|(question, value)| -> Result<i32, Error> {
                value
                    .map(i32::from)
                    .ok_or_else(|| InvalidInput::Unanswered(question.id).into())
            })
            .collect()
    }

    pub fn assess(&self) -> Result<Assessment, Error> {
        Scorer::new(self.instrument).assess(&self.answers()?)
    }
}
