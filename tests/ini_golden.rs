use confedit::{Configuration, IniError, Notation, OutputMode, SectionName};
use similar::{ChangeTag, TextDiff};
use std::fs;

const PHP_INI: &str = "tests/fixtures/php.ini";

fn load_fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|err| panic!("failed to load fixture {name}: {err}"))
}

/// Lines removed from and added to `before` to get `after`.
fn changed_lines(before: &str, after: &str) -> (Vec<String>, Vec<String>) {
    let diff = TextDiff::from_lines(before, after);
    let mut removed = Vec::new();
    let mut added = Vec::new();
    for change in diff.iter_all_changes() {
        let text = change.value().trim_end_matches('\n').to_string();
        match change.tag() {
            ChangeTag::Delete => removed.push(text),
            ChangeTag::Insert => added.push(text),
            ChangeTag::Equal => {}
        }
    }
    (removed, added)
}

#[test]
fn parses_sections_in_order() {
    let config = Configuration::parse(PHP_INI).expect("parse");
    let names: Vec<String> = config
        .sections()
        .iter()
        .map(|section| section.name.to_string())
        .collect();
    assert_eq!(
        names,
        ["(global)", "PHP", "CLI Server", "Date", "mail function"]
    );
    assert_eq!(config.sections()[0].name, SectionName::Global);
}

#[test]
fn parses_section_lines_and_keys() {
    let config = Configuration::parse(PHP_INI).expect("parse");
    let expected = [
        (SectionName::Global, 3, 0),
        (SectionName::Named("PHP".into()), 20, 7),
        (SectionName::Named("CLI Server".into()), 4, 1),
        (SectionName::Named("Date".into()), 2, 0),
        (SectionName::Named("mail function".into()), 6, 2),
    ];

    for (name, lines, keys) in expected {
        let section = config
            .section(&name)
            .unwrap_or_else(|| panic!("missing section {name}"));
        assert_eq!(section.lines.len(), lines, "line count of {name}");
        assert_eq!(section.key_values().count(), keys, "key count of {name}");
    }
}

#[test]
fn full_output_reproduces_fixture() {
    let input = load_fixture("php.ini");
    let config = Configuration::parse(PHP_INI).expect("parse");
    assert_eq!(config.render(OutputMode::Full), input);
}

#[test]
fn key_values_output_matches_fixture() {
    let expected = load_fixture("php_key_values_only.ini");
    let config = Configuration::parse(PHP_INI).expect("parse");
    assert_eq!(config.render(OutputMode::KeyValues), expected);
}

#[test]
fn gets_existing_parameters() {
    let cases = [
        ("PHP.engine", "On"),
        ("PHP.precision", "14"),
        ("PHP.disable_classes", ""),
        ("PHP.error_reporting", "E_ALL & ~E_DEPRECATED & ~E_STRICT"),
        ("PHP.include_path", "\".:/usr/share/php\""),
        ("PHP.default_mimetype", "\"text/html\""),
        ("PHP.zend_extension", "opcache"),
        ("mail function.SMTP", "localhost"),
        ("mail function.smtp_port", "25"),
    ];

    for (key, expected) in cases {
        let value = confedit::get_value(PHP_INI, Notation::Dot, key)
            .unwrap_or_else(|err| panic!("{key}: {err}"));
        assert_eq!(value, expected, "value of {key}");
    }

    let value = confedit::get_value(
        PHP_INI,
        Notation::Brackets,
        "CLI Server[cli_server.color]",
    )
    .expect("bracket lookup");
    assert_eq!(value, "On");
}

#[test]
fn missing_parameters_fail() {
    let cases = ["PHP.not_a_real_key", "not_a_real_key", "Foobar.baz"];
    for key in cases {
        let result = confedit::get_value(PHP_INI, Notation::Dot, key);
        assert!(result.is_err(), "{key} should not resolve");
    }

    assert!(matches!(
        confedit::get_value(PHP_INI, Notation::Dot, "Foobar.baz"),
        Err(IniError::SectionNotFound { .. })
    ));
    assert!(matches!(
        confedit::get_value(PHP_INI, Notation::Dot, "PHP.not_a_real_key"),
        Err(IniError::KeyNotFound { .. })
    ));
}

#[test]
fn edits_change_exactly_one_line() {
    let input = load_fixture("php.ini");
    let cases = [
        ("PHP.engine", "Off", "engine = On", "engine=Off"),
        ("PHP.precision", "140", "precision = 14", "precision=140"),
        (
            "PHP.disable_classes",
            "myclass",
            "disable_classes =",
            "disable_classes=myclass",
        ),
        (
            "PHP.error_reporting",
            "E_ALL",
            "error_reporting = E_ALL & ~E_DEPRECATED & ~E_STRICT",
            "error_reporting=E_ALL",
        ),
        (
            "PHP.include_path",
            "\".\"",
            "  include_path = \".:/usr/share/php\"",
            "include_path=\".\"",
        ),
        (
            "PHP.default_mimetype",
            "\"text/plain\"",
            "default_mimetype = \"text/html\"",
            "default_mimetype=\"text/plain\"",
        ),
        (
            "PHP.zend_extension",
            "opcache.so",
            "zend_extension=opcache",
            "zend_extension=opcache.so",
        ),
        (
            "mail function.SMTP",
            "smtp.gmail.com",
            "SMTP = localhost",
            "SMTP=smtp.gmail.com",
        ),
        ("mail function.smtp_port", "587", "smtp_port = 25", "smtp_port=587"),
    ];

    for (key, value, removed_line, added_line) in cases {
        let config = confedit::set_value(PHP_INI, Notation::Dot, key, value)
            .unwrap_or_else(|err| panic!("{key}: {err}"));
        assert_eq!(config.get_value(Notation::Dot, key).unwrap(), value);

        let output = config.render(OutputMode::Full);
        let (removed, added) = changed_lines(&input, &output);
        assert_eq!(removed, [removed_line], "removed lines for {key}");
        assert_eq!(added, [added_line], "added lines for {key}");
    }
}

#[test]
fn edits_bracket_addressed_parameter() {
    let input = load_fixture("php.ini");
    let config = confedit::set_value(
        PHP_INI,
        Notation::Brackets,
        "CLI Server[cli_server.color]",
        "black",
    )
    .expect("set");

    assert_eq!(
        config
            .get_value(Notation::Brackets, "CLI Server[cli_server.color]")
            .unwrap(),
        "black"
    );
    let (removed, added) = changed_lines(&input, &config.render(OutputMode::Full));
    assert_eq!(removed, ["cli_server.color = On"]);
    assert_eq!(added, ["cli_server.color=black"]);
}

#[test]
fn setting_a_file_does_not_write_it() {
    let before = load_fixture("php.ini");
    let _ = confedit::set_value(PHP_INI, Notation::Dot, "PHP.engine", "Off").expect("set");
    assert_eq!(load_fixture("php.ini"), before);
}

#[test]
fn writes_edited_document_to_new_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("php.ini");

    let config = confedit::set_value(PHP_INI, Notation::Dot, "PHP.engine", "Off").expect("set");
    config.write(&out, OutputMode::Full).expect("write");

    let written = fs::read_to_string(&out).expect("read output");
    assert_eq!(
        written,
        load_fixture("php.ini").replace("engine = On", "engine=Off")
    );
}

#[test]
fn latin1_comments_survive_an_edit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("php.ini");
    const HEADER: &[u8] = b"; caf\xe9 settings\n";
    let mut bytes = HEADER.to_vec();
    bytes.extend_from_slice(load_fixture("php.ini").as_bytes());
    fs::write(&path, &bytes).expect("write fixture");

    let config = Configuration::parse(&path).expect("parse");
    assert_eq!(config.encoding(), confedit::Encoding::Latin1);
    config.write(&path, OutputMode::Full).expect("write");
    assert_eq!(fs::read(&path).expect("read back"), bytes);

    let mut config = Configuration::parse(&path).expect("reparse");
    config
        .set_value(Notation::Dot, "PHP.engine", "Off")
        .expect("set");
    config.save(OutputMode::Full).expect("save");

    let expected = load_fixture("php.ini").replace("engine = On", "engine=Off");
    let written = fs::read(&path).expect("read edited");
    assert_eq!(&written[..HEADER.len()], HEADER);
    assert_eq!(&written[HEADER.len()..], expected.as_bytes());
}
