use pss_assessment::{classify, score, score_and_classify, AnswerSheet, InvalidInput, StressLevel};

fn level_of(answers: &[i32]) -> (u32, StressLevel) {
    let (score, band) = score_and_classify(answers).unwrap();
    (score, band.level)
}

#[test]
fn all_never() {
    assert_eq!(level_of(&[0; 10]), (16, StressLevel::Moderate));
}

#[test]
fn all_very_often() {
    assert_eq!(level_of(&[4; 10]), (24, StressLevel::Moderate));
}

#[test]
fn all_sometimes() {
    assert_eq!(level_of(&[2; 10]), (20, StressLevel::Moderate));
}

#[test]
fn least_stressed_pattern() {
    assert_eq!(
        level_of(&[0, 0, 0, 4, 4, 0, 4, 4, 0, 0]),
        (0, StressLevel::Low)
    );
}

#[test]
fn most_stressed_pattern() {
    assert_eq!(
        level_of(&[4, 4, 4, 0, 0, 4, 0, 0, 4, 4]),
        (40, StressLevel::High)
    );
}

#[test]
fn band_boundaries() {
    // 非逆転項目だけで合計を作る
    let total = |n: i32| {
        let mut answers = [0, 0, 0, 4, 4, 0, 4, 4, 0, 0];
        let mut rest = n;
        for index in [0, 1, 2, 5, 8, 9] {
            let take = rest.min(4);
            answers[index] = take;
            rest -= take;
        }
        answers
    };
    assert_eq!(level_of(&total(13)), (13, StressLevel::Low));
    assert_eq!(level_of(&total(14)), (14, StressLevel::Moderate));
    let mut answers = total(24);
    answers[3] = 2;
    assert_eq!(level_of(&answers), (26, StressLevel::Moderate));
    answers[3] = 1;
    assert_eq!(level_of(&answers), (27, StressLevel::High));
    assert_eq!(classify(26).unwrap().level, StressLevel::Moderate);
    assert_eq!(classify(27).unwrap().level, StressLevel::High);
}

#[test]
fn rejects_malformed_answer_sets() {
    for answers in [
        vec![],
        vec![2; 9],
        vec![2; 11],
        vec![2, 2, 2, 2, 2, 2, 2, 2, 2, -1],
        vec![5, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    ] {
        let err = score(&answers).unwrap_err();
        assert!(err.invalid_input().is_some(), "{:?}", answers);
    }
}

#[test]
fn sheet_matches_direct_scoring() {
    let answers = [3, 1, 4, 1, 0, 2, 1, 3, 4, 2];
    let mut sheet = AnswerSheet::default();
    for &answer in &answers {
        sheet.push(answer).unwrap();
    }
    let assessment = sheet.assess().unwrap();
    assert_eq!(assessment.score, score(&answers).unwrap());
    assert_eq!(
        AnswerSheet::default().assess().unwrap_err().invalid_input(),
        Some(&InvalidInput::Unanswered(1))
    );
}
