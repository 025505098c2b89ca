use super::*;

#[test]
fn decoded_unescapes_both_fields() {
    let fact = Fact::new(
        "Which is &quot;larger&quot;: 2 &lt; 3?",
        "Rock &amp; Roll&#039;s",
    );
    let d = fact.decoded();
    assert_eq!(d.question, "Which is \"larger\": 2 < 3?");
    assert_eq!(d.correct_answer, "Rock & Roll's");
    // The undecoded fact stays untouched.
    assert!(fact.question.contains("&quot;"));
}

#[test]
fn parse_accepts_bare_array() {
    let facts = parse_facts(r#"[{"question":"2+2=?","correct_answer":"4"}]"#).unwrap();
    assert_eq!(facts, vec![Fact::new("2+2=?", "4")]);
}

#[test]
fn parse_accepts_trivia_response_and_ignores_extras() {
    let json = r#"{
        "response_code": 0,
        "results": [{
            "type": "multiple",
            "difficulty": "easy",
            "category": "Science",
            "question": "H2O is?",
            "correct_answer": "Water",
            "incorrect_answers": ["Fire", "Air", "Earth"]
        }]
    }"#;
    let facts = parse_facts(json).unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].correct_answer, "Water");
}

#[test]
fn parse_rejects_failed_response_code() {
    let err = parse_facts(r#"{"response_code": 1, "results": []}"#).unwrap_err();
    assert!(err.to_string().contains("response_code 1"));
}

#[test]
fn parse_rejects_malformed_json() {
    assert!(parse_facts("{").is_err());
    assert!(parse_facts(r#"[{"question":"missing answer"}]"#).is_err());
}
