use thiserror::Error;

/// 回答セットや得点が設問定義と整合しない
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },
    #[error("answer {value} to question {question} is outside 0..=4")]
    AnswerOutOfRange { question: u32, value: i32 },
    #[error("score {score} is outside 0..={max}")]
    ScoreOutOfRange { score: u32, max: u32 },
    #[error("question {0} has not been answered")]
    Unanswered(u32),
    #[error("every question has already been answered")]
    AlreadyComplete,
    #[error("no question with id {0}")]
    UnknownQuestion(u32),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// 設問定義ファイルの検証エラー
    #[error("invalid instrument definition: {0}")]
    Instrument(String),
    /// 一括入力の行が読めない
    #[error("line {line}: {message}")]
    Record { line: u64, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn invalid_input(&self) -> Option<&InvalidInput> {
        match self {
            Error::InvalidInput(reason) => Some(reason),
            _ => None,
        }
    }
}
