use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_plain_question() {
    let text = "What does caries mean?";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_short_quit() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_quit() {
    let cmd = SlashCommand::parse("/quit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_exit() {
    let cmd = SlashCommand::parse("/exit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_not_is_quit() {
    let cmd = SlashCommand::parse("/rm").unwrap();
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_short_upload() {
    let cmd = SlashCommand::parse("/u ./opg.png").unwrap();
    assert!(cmd.is_upload());
    assert_eq!(cmd.arg_text(), "./opg.png");
}
#[test]
fn it_is_upload_with_spaces_in_path() {
    let cmd = SlashCommand::parse("/upload ./my scans/opg 1.png").unwrap();
    assert!(cmd.is_upload());
    assert_eq!(cmd.arg_text(), "./my scans/opg 1.png");
}
#[test]
fn it_is_upload_without_path() {
    let cmd = SlashCommand::parse("/upload").unwrap();
    assert!(cmd.is_upload());
    assert_eq!(cmd.arg_text(), "");
}

#[test]
fn it_is_short_remove() {
    let cmd = SlashCommand::parse("/rm").unwrap();
    assert!(cmd.is_remove());
}
#[test]
fn it_is_remove() {
    let cmd = SlashCommand::parse("/remove").unwrap();
    assert!(cmd.is_remove());
}

#[test]
fn it_is_short_analysis() {
    let cmd = SlashCommand::parse("/an").unwrap();
    assert!(cmd.is_analysis());
}
#[test]
fn it_is_analysis() {
    let cmd = SlashCommand::parse("/analysis").unwrap();
    assert!(cmd.is_analysis());
}

#[test]
fn it_is_stop() {
    assert!(SlashCommand::parse("/s").unwrap().is_stop());
    assert!(SlashCommand::parse("/stop").unwrap().is_stop());
}

#[test]
fn it_is_clear() {
    let cmd = SlashCommand::parse("/clear").unwrap();
    assert!(cmd.is_clear());
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_short_help() {
    let cmd = SlashCommand::parse("/h").unwrap();
    assert!(cmd.is_help());
}
#[test]
fn it_is_help() {
    let cmd = SlashCommand::parse("/help").unwrap();
    assert!(cmd.is_help());
}
