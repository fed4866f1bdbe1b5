use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::ops::RangeInclusive;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 回答選択肢の最大値。逆転項目はこの値から回答を引く。
pub const MAX_ANSWER: u8 = 4;

/// PSS-10 のマスタ表現。初回参照時に一度だけ読み込まれ、以後は読み取り専用で共有される。
pub static PSS10: Lazy<Instrument> = Lazy::new(|| {
    Instrument::from_json(include_str!("../resources/pss10.json"))
        .expect("embedded PSS-10 definition is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    /// 逆転項目
    #[serde(rename = "reverse")]
    pub is_reversed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOption {
    pub value: u8,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressLevel {
    #[serde(rename = "Low Stress")]
    Low,
    #[serde(rename = "Moderate Stress")]
    Moderate,
    #[serde(rename = "High Stress")]
    High,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [StressLevel::Low, StressLevel::Moderate, StressLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "Low Stress",
            StressLevel::Moderate => "Moderate Stress",
            StressLevel::High => "High Stress",
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Video,
    Audio,
    Toolkit,
    Course,
}

/// 段階ごとに勧めるコンテンツ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    /// "5 min read"、"4 sessions" などの表示用文字列
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub premium: bool,
}

/// 得点帯。下限は直前の帯の上限 + 1 (先頭の帯は 0)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressLevelBand {
    pub level: StressLevel,
    /// この帯に含まれる最大得点
    pub upper: u32,
    pub description: String,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

impl StressLevelBand {
    /// 種類で絞り込んだコンテンツ。`None` なら全件。
    pub fn content_of(&self, kind: Option<ContentType>) -> impl Iterator<Item = &ContentItem> {
        self.content
            .iter()
            .filter(move |item| kind.map_or(true, |kind| item.kind == kind))
    }

    pub fn free_content(&self) -> impl Iterator<Item = &ContentItem> {
        self.content.iter().filter(|item| !item.premium)
    }
}

/// 質問票の定義。設問、回答選択肢、得点帯をデータとして持つ。
#[derive(Debug, Clone, Serialize)]
pub struct Instrument {
    pub name: String,
    /// 教示文
    pub preamble: String,
    questions: Vec<Question>,
    options: Vec<ResponseOption>,
    bands: Vec<StressLevelBand>,
}

/// 検証前の定義ファイル表現
#[derive(Deserialize)]
struct Definition {
    name: String,
    #[serde(default)]
    preamble: String,
    questions: Vec<Question>,
    options: Vec<ResponseOption>,
    bands: Vec<StressLevelBand>,
}

impl TryFrom<Definition> for Instrument {
    type Error = Error;

    fn try_from(def: Definition) -> Result<Self, Self::Error> {
        let instrument = Instrument::new(
            def.name,
            def.preamble,
            def.questions,
            def.options,
            def.bands,
        )?;
        debug!(
            "loaded instrument '{}' with {} questions",
            instrument.name,
            instrument.len()
        );
        Ok(instrument)
    }
}

impl Instrument {
    pub fn new(
        name: impl Into<String>,
        preamble: impl Into<String>,
        questions: Vec<Question>,
        options: Vec<ResponseOption>,
        bands: Vec<StressLevelBand>,
    ) -> Result<Self, Error> {
        let instrument = Instrument {
            name: name.into(),
            preamble: preamble.into(),
            questions,
            options,
            bands,
        };
        instrument.validate()?;
        Ok(instrument)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str::<Definition>(json)?.try_into()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader::<_, Definition>(reader)?.try_into()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("reading instrument definition from {}", path.display());
        let f = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// 設問数、選択肢、得点帯の整合性を検証する
    fn validate(&self) -> Result<(), Error> {
        if self.questions.is_empty() {
            return Err(Error::Instrument("no questions defined".into()));
        }
        let mut previous = 0;
        for question in &self.questions {
            if question.id == 0 {
                return Err(Error::Instrument("question ids start at 1".into()));
            }
            if question.id <= previous {
                return Err(Error::Instrument(format!(
                    "question ids must be strictly ascending, found {} after {}",
                    question.id, previous
                )));
            }
            previous = question.id;
        }

        let values = self.options.iter().map(|o| o.value).collect::<Vec<u8>>();
        if values != (0..=MAX_ANSWER).collect::<Vec<u8>>() {
            return Err(Error::Instrument(format!(
                "response options must be exactly 0..={}, found {:?}",
                MAX_ANSWER, values
            )));
        }

        let levels = self.bands.iter().map(|b| b.level).collect::<Vec<_>>();
        if levels != StressLevel::ALL {
            return Err(Error::Instrument(format!(
                "bands must be Low, Moderate, High in order, found {:?}",
                levels
            )));
        }
        for pair in self.bands.windows(2) {
            if pair[1].upper <= pair[0].upper {
                return Err(Error::Instrument(format!(
                    "band upper bounds must increase, {} follows {}",
                    pair[1].upper, pair[0].upper
                )));
            }
        }
        // 帯の上限は設問数から決まる最高点と一致しなければならない。
        // 設問数を変えた場合は閾値を見直すこと。
        if let Some(last) = self.bands.last() {
            if last.upper != self.max_score() {
                return Err(Error::Instrument(format!(
                    "last band ends at {} but the maximum score is {}",
                    last.upper,
                    self.max_score()
                )));
            }
        }
        if let Some(band) = self.bands.iter().find(|b| b.recommendations.is_empty()) {
            return Err(Error::Instrument(format!(
                "{} has no recommendations",
                band.level
            )));
        }
        let mut ids = HashSet::new();
        for item in self.bands.iter().flat_map(|band| &band.content) {
            if !ids.insert(item.id.as_str()) {
                return Err(Error::Instrument(format!(
                    "content id '{}' is used more than once",
                    item.id
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 最高点 (4 × 設問数)
    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32 * u32::from(MAX_ANSWER)
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// 設問番号を指定して設問を取得する
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub(crate) fn position(&self, id: u32) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn options(&self) -> &[ResponseOption] {
        &self.options
    }

    pub fn option(&self, value: u8) -> Option<&ResponseOption> {
        self.options.iter().find(|option| option.value == value)
    }

    pub fn bands(&self) -> &[StressLevelBand] {
        &self.bands
    }

    pub fn band(&self, level: StressLevel) -> &StressLevelBand {
        // validate() が 3 帯を順に揃えることを保証している
        &self.bands[level as usize]
    }

    /// 得点帯の範囲 (両端を含む)
    pub fn band_range(&self, level: StressLevel) -> RangeInclusive<u32> {
        let index = level as usize;
        let lower = match index {
            0 => 0,
            _ => self.bands[index - 1].upper + 1,
        };
        lower..=self.bands[index].upper
    }
}
