use super::*;

#[test]
fn reveals_one_char_per_interval() {
    let mut t = TypingReveal::new("Hey", 0.05);
    assert_eq!(t.displayed(), "");
    assert!(t.is_typing());

    t.advance(0.06);
    assert_eq!(t.displayed(), "H");
    t.advance(0.05);
    assert_eq!(t.displayed(), "He");
    t.advance(1.0);
    assert_eq!(t.displayed(), "Hey");
    assert!(!t.is_typing());
}

#[test]
fn multibyte_text_is_cut_on_char_boundaries() {
    let mut t = TypingReveal::new("héllo ✓", 0.1);
    for _ in 0..20 {
        t.advance(0.037);
        let shown = t.displayed();
        assert!(t.text().starts_with(shown));
    }
    assert_eq!(t.displayed(), "héllo ✓");
}

#[test]
fn restart_clears_progress() {
    let mut t = TypingReveal::new("What's your name?", 0.05);
    t.advance(10.0);
    t.restart("What's your email address?");
    assert_eq!(t.displayed(), "");
    assert!(t.is_typing());
}

#[test]
fn empty_text_is_done_immediately() {
    let t = TypingReveal::new("", 0.05);
    assert!(!t.is_typing());
    assert_eq!(t.displayed(), "");
}
