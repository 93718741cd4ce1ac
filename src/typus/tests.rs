use super::*;
use crate::processors::rules::Tables;
use crate::processors::expressions::Rule;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};

fn ru(text: &str) -> String {
    Typus::ru().unwrap().process_with(text, &Options::new().debug(true))
}

fn en(text: &str) -> String {
    Typus::en().unwrap().process(text)
}

fn check(typus: &Typus, options: &Options, cases: &[(&str, &str)]) {
    for (source, expected) in cases {
        assert_eq!(typus.process_with(source, options), *expected, "source: {source:?}");
    }
}

/// Counts calls and passes the text on untouched.
#[derive(Clone, Default)]
struct Counter(Arc<AtomicUsize>);

impl Counter {
    fn calls(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Processor for Counter {
    fn run(&self, text: String, options: &Options, next: Chain<'_>) -> String {
        self.0.fetch_add(1, Ordering::SeqCst);
        next.run(text, options)
    }
}

#[derive(Default)]
struct Spy {
    restored: AtomicUsize,
    switched: AtomicUsize,
}

impl Probe for Spy {
    fn restored(&self, _kind: &str, _records: usize) {
        self.restored.fetch_add(1, Ordering::SeqCst);
    }

    fn nesting_switched(&self, _passes: usize) {
        self.switched.fetch_add(1, Ordering::SeqCst);
    }
}

fn spied(locale: Locale) -> (Typus, Arc<Spy>) {
    let spy = Arc::new(Spy::default());
    let typus = locale.builder().probe(spy.clone()).build().unwrap();
    (typus, spy)
}

#[test]
fn test_no_stages() {
    assert_eq!(Typus::builder().build().err(), Some(ConfigError::NoProcessors));
    let quotes_only = Typus::builder().quotes(Quotes::RU).build();
    assert_eq!(quotes_only.err(), Some(ConfigError::NoProcessors));
}

#[test]
fn test_quotes_stage_without_glyphs() {
    let typus = Typus::builder().stage(Stage::Quotes).build();
    assert_eq!(typus.err(), Some(ConfigError::MissingQuotes));
}

#[test]
fn test_unknown_expression() {
    let typus = Locale::En.builder().expressions(["spaces", "kerning"]).build();
    assert_eq!(typus.err(), Some(ConfigError::UnknownExpression("kerning".to_string())));
}

#[test]
fn test_empty_input_skips_processors() {
    let counter = Counter::default();
    let typus = Typus::builder().processor(counter.clone()).build().unwrap();

    assert_eq!(typus.process(""), "");
    assert_eq!(typus.process("   "), "");
    assert_eq!(typus.process(" \n\t\u{a0}"), "");
    assert_eq!(counter.calls(), 0);

    assert_eq!(typus.process(" foo "), "foo");
    assert_eq!(counter.calls(), 1);
}

#[test]
fn test_custom_processors_keep_order() {
    struct Append(&'static str);

    impl Processor for Append {
        fn run(&self, text: String, options: &Options, next: Chain<'_>) -> String {
            next.run(text + self.0, options)
        }
    }

    let typus = Typus::builder()
        .processor(Append("1"))
        .processor(Append("2"))
        .build()
        .unwrap();
    assert_eq!(typus.process("0"), "012");
}

#[test]
fn test_stage_order_matters() {
    // Quotes inside an escaped tag attribute survive only when html is
    // escaped before quotes run.
    let source = "<b id=\"x\">\"y\"</b>";
    let safe = Typus::builder()
        .stages([Stage::EscapeHtml, Stage::Quotes])
        .quotes(Quotes::RU)
        .build()
        .unwrap();
    assert_eq!(safe.process(source), "<b id=\"x\">«y»</b>");

    let unsafe_order = Typus::builder()
        .stages([Stage::Quotes, Stage::EscapeHtml])
        .quotes(Quotes::RU)
        .build()
        .unwrap();
    assert_eq!(unsafe_order.process(source), "<b id=«x»>«y»</b>");
}

#[test]
fn test_define_expression() {
    fn shrug(_: &Tables) -> Vec<Rule> {
        vec![Rule::new(r"\bshrug\b", "¯\\_(ツ)_/¯")]
    }

    let typus = Locale::En
        .builder()
        .define_expression("shrug", shrug)
        .expressions(["spaces", "shrug"])
        .build()
        .unwrap();
    assert_eq!(typus.process("well,   shrug"), "well, ¯\\_(ツ)_/¯");
}

#[test]
fn test_debug_marks_non_breaking_spaces() {
    let typus = Typus::ru().unwrap();
    assert_eq!(typus.process("2mm"), "2\u{a0}mm");
    assert_eq!(typus.process_with("2mm", &Options::new().debug(true)), "2_mm");
    assert_eq!(
        typus.process_with("foo -- bar", &Options::new().debug(true)),
        "foo_—\u{2009}bar"
    );
}

#[test]
fn test_quote_depths() {
    let typus = Typus::builder()
        .stage(Stage::Quotes)
        .quotes(Quotes::RU)
        .build()
        .unwrap();
    check(
        &typus,
        &Options::default(),
        &[
            ("00 \"11\" 00", "00 «11» 00"),
            ("\"00 \"11\" 00\"", "«00 „11“ 00»"),
            ("00\" \"11 \"22\" 11\"", "00\" «11 „22“ 11»"),
            ("\"\"\"\"\"\"\"test\"\"\"\"\"\"\"", "«„«„«„«test»“»“»“»"),
            ("\" test\"", "\" test\""),
        ],
    );
}

#[test]
fn test_ru_pipeline() {
    check(
        &Typus::ru().unwrap(),
        &Options::new().debug(true),
        &[
            ("2mm", "2_mm"),
            ("foo - \"11\" 00", "foo_—\u{2009}«11» 00"),
            ("2 - 2foo", "2_—\u{2009}2foo"),
            ("2 - 2", "2_−_2"),
            ("\"4\"", "«4»"),
            ("55-555", "55–555"),
            ("2-3 foo", "2–3_foo"),
            ("(15-20 items)", "(15–20_items)"),
            ("2 - 3", "2_−_3"),
            ("2-3 x 4", "2−3_×_4"),
            ("3-3", "3−3"),
            ("aaa 2a", "aaa 2a"),
            ("4444444 foo", "4444444 foo"),
            ("444 -", "444_—"),
            ("x3 better!", "×3 better!"),
            ("3 x 3 = 9", "3_×_3_= 9"),
            ("1000 р.", "1000_₽"),
            ("   foo bar  ", "foo bar"),
            ("foo\r\nbar\n\n\nbaz", "foo\nbar\n\nbaz"),
            ("1/2 cup", "½_cup"),
            ("<p>\"a\" -- <br>b</p>", "<p>«a»_—\u{2009}<br>b</p>"),
        ],
    );
}

#[test]
fn test_ru_nested_quotes_with_dash() {
    assert_eq!(
        ru("Он сказал: \"'Винни-Пух' -- моя любимая книга!\"."),
        "Он_сказал: «„Винни-Пух“_—\u{2009}моя любимая книга!»."
    );
}

#[test]
fn test_ru_quotes_fire() {
    assert_eq!(
        ru("00\" \"11 '22' 11\"? \"11 '22 \"33 33?\"' 11\" 00 \"11 '22' 11\" 0\""),
        "00″ «11 „22“ 11»? «11 „22 «33_33?»“ 11» 00 «11 „22“ 11» 0″"
    );
}

#[test]
fn test_long_text_keeps_quotes() {
    let source = format!("{}\"end\" -- (c)", "the '90s were fine. ".repeat(1000));
    assert!(source.len() > 20_000);
    let result = ru(&source);
    assert!(
        result.ends_with("fine. «end»_—\u{2009}©"),
        "tail: {:?}",
        result.chars().rev().take(20).collect::<String>()
    );
}

#[test]
fn test_ru_text() {
    let source = "Излучение, как следует из вышесказанного, концентрирует \
        внутримолекулярный предмет - деятельности. \"...ff 'Можно?' \
        предположить, что силовое - \"поле \"мент \"d\" ально\" отклоняет\" \
        сенсибельный 'квазар!..' cc\", не учитывая мнения авторитетов. \
        Искусство испускает данный электрон, учитывая опасность, \
        <code> \"d\" test -- test(c)</code> которую    представляли \
        собой писания Дюринга для не окрепшего еще немецкого рабочего \
        движения. Смысл жизни -- амбивалентно (с) дискредитирует \
        закон (r) исключённого(tm) третьего (тм)...\n\n\n\
        - Химическое соединение ненаблюдаемо контролирует экран-ый \
        квазар. Идеи 3/4   гедонизма занимают b & b центральное место \
        в утилитаризме \"Милля и Бентама\", однако <- гравитирующая -> \
        сфера масштабирует фотон, +-2мм изменяя привычную реальность. \
        Силовое *3 поле -3 реально 3 * 2 /= 6   3x3 восстанавливает \
        трансцендентальный 3\" 2' принцип 1000р. восприятия.\
        \"...'test'\" (c) m&m's";
    let expected = "Излучение, как следует из_вышесказанного, концентрирует \
        внутримолекулярный предмет_—\u{2009}деятельности. «…ff „Можно?“ \
        предположить, что силовое_—\u{2009}„поле «мент „d“ ально» отклоняет“ \
        сенсибельный „квазар!..“ cc», не_учитывая мнения авторитетов. \
        Искусство испускает данный электрон, учитывая опасность, \
        <code> \"d\" test -- test(c)</code> которую представляли \
        собой писания Дюринга для не_окрепшего еще немецкого рабочего \
        движения. Смысл жизни_—\u{2009}амбивалентно ©_дискредитирует \
        закон® исключённого™ третьего™…\n\n\
        —_Химическое соединение ненаблюдаемо контролирует экран-ый \
        квазар. Идеи ¾_гедонизма занимают b_&_b_центральное место \
        в_утилитаризме «Милля и_Бентама», однако ←_гравитирующая_→ \
        сфера масштабирует фотон, ±2_мм изменяя привычную реальность. \
        Силовое ×3_поле −3_реально 3_×_2_≠_6 3×3 восстанавливает \
        трансцендентальный 3″ 2′ принцип 1000_₽ восприятия.\
        «…„test“» ©_m&m’s";
    assert_eq!(ru(source), expected);
}

#[test]
fn test_en_pipeline() {
    check(
        &Typus::en().unwrap(),
        &Options::default(),
        &[
            ("Say \"what\" again!", "Say “what” again!"),
            (
                "He said \"'Winnie-the-Pooh' is my favorite book!\".",
                "He\u{a0}said “‘Winnie-the-Pooh’ is\u{a0}my\u{a0}favorite book!”.",
            ),
            (
                "She'd, I'm, it's, don't, you're, he'll, 90's",
                "She’d, I’m, it’s, don’t, you’re, he’ll, 90’s",
            ),
            ("foo -- bar", "foo\u{202f}—\u{2009}bar"),
            ("3' 5\" long", "3′ 5″ long"),
            ("\"don't\"", "“don’t”"),
            ("Typus turns <code>(c)</code> into \"(c)\"", "Typus turns <code>(c)</code> into “©”"),
        ],
    );
}

#[test]
fn test_escape_phrases() {
    let typus = Typus::en().unwrap();
    assert_eq!(
        en("Typus turns `(c)` into \"(c)\""),
        "Typus turns `©` into “©”"
    );
    assert_eq!(
        typus.process_with(
            "Typus turns `(c)` into \"(c)\"",
            &Options::new().escape_phrases(["`(c)`"])
        ),
        "Typus turns `(c)` into “©”"
    );
    assert_eq!(
        typus.process_with("a (c) b (c)", &Options::new().escape_phrases(["(c)", " ", "(c) b"])),
        "a\u{a0}(c) b\u{a0}(c)"
    );
}

#[test]
fn test_html_is_kept() {
    let typus = Typus::ru().unwrap();
    for source in [
        "<pre>\"test\"</pre>",
        "<pre><code>\"test\"</code></pre>",
        "<!-- \"(c)\" -->",
        "<!---->",
        "<!DOCTYPE html>",
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
        "<head><title>(c)</title></head>",
        "<iframe height=\"500\" width=\"500\">(c)</iframe>",
        "<script type=\"text/javascript\" src=\"/test/\">\"test\"</script>",
        "<style>a::before { content: \"--\" }</style>",
        "<!-- <b>\"x\"</b> -- -->",
    ] {
        assert_eq!(typus.process(source), source);
    }
    check(
        &typus,
        &Options::default(),
        &[
            ("<b id=\"test\">\"test\"</b>", "<b id=\"test\">«test»</b>"),
            ("<img alt=\"test\"/>\"test\"", "<img alt=\"test\"/>«test»"),
        ],
    );
}

#[test]
fn test_html_page_round_trip() {
    let page = "<html>\n<head><title>\"T\" -- (c)</title></head>\n<body>\n\
        <pre>  a -- b, 1/2 \"q\"  </pre>\n\
        <script>if (a -- > 2) { s = \"x\" }</script>\n\
        <p>\"Hi\"</p>\n</body>\n</html>";
    let result = Typus::ru().unwrap().process(page);
    for block in [
        "<head><title>\"T\" -- (c)</title></head>",
        "<pre>  a -- b, 1/2 \"q\"  </pre>",
        "<script>if (a -- > 2) { s = \"x\" }</script>",
    ] {
        assert!(result.contains(block), "lost {block:?} in {result:?}");
    }
    assert!(result.contains("<p>«Hi»</p>"), "got {result:?}");
}

#[test]
fn test_nested_code_is_not_supported() {
    let source = "<code>dsfsdf <code>\"test\"</code> \"sdfdf\"</code>";
    let result = Typus::ru().unwrap().process(source);
    assert_ne!(result, source);
    assert_eq!(result, "<code>dsfsdf <code>\"test\"</code> «sdfdf»</code>");
}

#[test]
fn test_restore_skipped_without_escapes() {
    let (typus, spy) = spied(Locale::Ru);
    typus.process("plain \"text\"");
    assert_eq!(spy.restored.load(Ordering::SeqCst), 0);

    typus.process("<b>plain</b>");
    assert_eq!(spy.restored.load(Ordering::SeqCst), 1);

    typus.process_with("a (c) b", &Options::new().escape_phrases(["(c)"]));
    assert_eq!(spy.restored.load(Ordering::SeqCst), 2);
}

#[test]
fn test_switch_skipped_for_flat_quotes() {
    let (typus, spy) = spied(Locale::En);
    typus.process("\"a\" and \"b\"");
    assert_eq!(spy.switched.load(Ordering::SeqCst), 0);

    typus.process("\"a 'b' c\"");
    assert_eq!(spy.switched.load(Ordering::SeqCst), 1);
}

#[test]
fn test_max_quote_depth() {
    let typus = Locale::Ru.builder().max_quote_depth(1).build().unwrap();
    assert_eq!(typus.process("'\"x\"'"), "«\"x\"»");
}

#[test]
fn test_shared_between_threads() {
    let typus = Typus::ru().unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| typus.process("\"foo \"bar\" baz\"")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "«foo „bar“ baz»");
        }
    });
}

#[test]
fn test_debug_format() {
    let typus = Typus::ru().unwrap();
    assert_eq!(typus.quotes(), Some(Quotes::RU));
    assert!(format!("{typus:?}").starts_with("Typus { processors: 4"));
}
