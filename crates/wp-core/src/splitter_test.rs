use super::*;

#[test]
fn test_single_statement() {
    assert_eq!(split_statements("SELECT 1;"), vec!["SELECT 1"]);
}

#[test]
fn test_two_statements_keep_leading_newline() {
    let sql = "SELECT 1;\nSELECT 2;\n";
    assert_eq!(split_statements(sql), vec!["SELECT 1", "\nSELECT 2"]);
}

#[test]
fn test_trailing_statement_without_terminator() {
    assert_eq!(
        split_statements("SELECT 1;\nselect 2"),
        vec!["SELECT 1", "\nselect 2"]
    );
}

#[test]
fn test_just_comments() {
    assert!(split_statements("-- hello world\n").is_empty());
}

#[test]
fn test_only_comments_and_blank_lines() {
    let sql = "\n   \n-- one\n    -- indented two\n\t\n";
    assert!(split_statements(sql).is_empty());
}

#[test]
fn test_empty_script() {
    assert!(split_statements("").is_empty());
}

#[test]
fn test_comments_and_statements() {
    let sql = "-- hello world
SELECT 1;
SELECT 2;
-- another comment
select 3
";
    assert_eq!(
        split_statements(sql),
        vec!["SELECT 1", "\nSELECT 2", "\nselect 3"]
    );
}

#[test]
fn test_semicolon_inside_literal_does_not_split() {
    let sql = "INSERT INTO t VALUES ('a;b');\nSELECT 2;";
    assert_eq!(
        split_statements(sql),
        vec!["INSERT INTO t VALUES ('a;b')", "\nSELECT 2"]
    );
}

#[test]
fn test_doubled_quote_inside_literal_does_not_split() {
    let sql = "INSERT INTO t VALUES ('it''s; fine');SELECT 1";
    assert_eq!(
        split_statements(sql),
        vec!["INSERT INTO t VALUES ('it''s; fine')", "SELECT 1"]
    );
}

#[test]
fn test_literal_spanning_lines() {
    let sql = "INSERT INTO t VALUES ('line one;\nline two');";
    assert_eq!(
        split_statements(sql),
        vec!["INSERT INTO t VALUES ('line one;\nline two')"]
    );
}

#[test]
fn test_empty_statements_discarded() {
    assert_eq!(split_statements(";;SELECT 1;;  ;"), vec!["SELECT 1"]);
}

#[test]
fn test_comment_marker_only_at_line_start() {
    // A trailing `--` on a code line is not a comment line and is kept.
    let sql = "SELECT 1; -- trailing\n";
    assert_eq!(split_statements(sql), vec!["SELECT 1", " -- trailing"]);
}

#[test]
fn test_non_ascii_text_is_preserved() {
    let sql = "INSERT INTO t VALUES ('héllo; wörld');SELECT 'ß'";
    assert_eq!(
        split_statements(sql),
        vec!["INSERT INTO t VALUES ('héllo; wörld')", "SELECT 'ß'"]
    );
}

#[test]
fn test_mysql_stored_proc_delimiter() {
    let sql = "DELIMITER ;;
CREATE DEFINER=`root`@`localhost` PROCEDURE `sp_insertLog`(
      _hash char(32),
      _event char(10),
      _id int(10),
      _ip char(15)
      )
begin
   declare sameRow int(1);
    select count(*) into sameRow from log
      where  event = _event and ip = _ip and id = _id and `hash` = _hash
      and TIMESTAMPDIFF(HOUR, dateAdded, now()) < 1;
    if (sameRow <= 0)  then
       insert into log (`hash`, event, id, ip) values (_hash, _event, _id, _ip);
    end if;
end;;
DELIMITER ;
        ";
    let expected = "\nCREATE DEFINER=`root`@`localhost` PROCEDURE `sp_insertLog`(
      _hash char(32),
      _event char(10),
      _id int(10),
      _ip char(15)
      )
begin
   declare sameRow int(1);
    select count(*) into sameRow from log
      where  event = _event and ip = _ip and id = _id and `hash` = _hash
      and TIMESTAMPDIFF(HOUR, dateAdded, now()) < 1;
    if (sameRow <= 0)  then
       insert into log (`hash`, event, id, ip) values (_hash, _event, _id, _ip);
    end if;
end";
    assert_eq!(split_statements(sql), vec![expected]);
}

#[test]
fn test_delimiter_pair_between_plain_statements() {
    let sql = "CREATE TABLE a (id INT);
DELIMITER ;;
CREATE PROCEDURE p() BEGIN SELECT 1; SELECT 2; END;;
DELIMITER ;
INSERT INTO a VALUES (1);";
    assert_eq!(
        split_statements(sql),
        vec![
            "CREATE TABLE a (id INT)",
            "\nCREATE PROCEDURE p() BEGIN SELECT 1; SELECT 2; END",
            "\nINSERT INTO a VALUES (1)",
        ]
    );
}

#[test]
fn test_directive_is_case_insensitive() {
    let sql = "delimiter ;;\nSELECT 1;SELECT 2;;\nDeLiMiTeR ;";
    assert_eq!(split_statements(sql), vec!["\nSELECT 1;SELECT 2"]);
}

#[test]
fn test_directive_without_semicolon_swallows_procedure() {
    // `DELIMITER $$` is not terminated by `;`, so the opening directive takes
    // the procedure header with it and the closing directive is never the
    // first token of a candidate. Aggregation stays open and nothing is emitted.
    let sql = "DELIMITER $$\nCREATE PROCEDURE p() BEGIN SELECT 1; END$$\nDELIMITER ;";
    assert!(split_statements(sql).is_empty());
}

#[test]
fn test_directive_requires_whole_first_token() {
    let sql = "delimiters_audit INSERT;SELECT 1;";
    assert_eq!(
        split_statements(sql),
        vec!["delimiters_audit INSERT", "SELECT 1"]
    );
}

#[test]
fn test_directives_never_emitted() {
    let sql = "DELIMITER ;;\nSELECT 1;;\nDELIMITER ;";
    let statements = split_statements(sql);
    assert!(statements
        .iter()
        .all(|s| !s.to_lowercase().contains("delimiter")));
}

#[test]
fn test_empty_delimiter_pair_emits_nothing() {
    let sql = "DELIMITER ;;\nDELIMITER ;\nSELECT 1;";
    assert_eq!(split_statements(sql), vec!["\nSELECT 1"]);
}

#[test]
fn test_unterminated_delimiter_drops_buffer() {
    let sql = "SELECT 0;\nDELIMITER ;;\nSELECT 1;\nSELECT 2;";
    assert_eq!(split_statements(sql), vec!["SELECT 0"]);
}

#[test]
fn test_two_delimiter_pairs() {
    let sql = "DELIMITER ;;\nA;B;;\nDELIMITER ;\nDELIMITER ;;\nC;D;;\nDELIMITER ;";
    assert_eq!(split_statements(sql), vec!["\nA;B", "\nC;D"]);
}

#[test]
fn test_postgresql_dollar_quoted_body_is_split() {
    let sql = "
CREATE FUNCTION add_three_values(v1 anyelement, v2 anyelement, v3 anyelement)
RETURNS anyelement AS $$
DECLARE
    result ALIAS FOR $0;
BEGIN
    result := v1 + v2 + v3;
    RETURN result;
END;
$$ LANGUAGE plpgsql;
        ";
    assert_eq!(
        split_statements(sql),
        vec![
            "CREATE FUNCTION add_three_values(v1 anyelement, v2 anyelement, v3 anyelement)\nRETURNS anyelement AS $$\nDECLARE\n    result ALIAS FOR $0",
            "\nBEGIN\n    result := v1 + v2 + v3",
            "\n    RETURN result",
            "\nEND",
            "\n$$ LANGUAGE plpgsql",
        ]
    );
}

#[test]
fn test_strip_comments_keeps_indentation() {
    let sql = "-- header\n  SELECT\n\n    1\n";
    assert_eq!(strip_comments(sql), "  SELECT\n    1");
}

#[test]
fn test_strip_comments_handles_crlf() {
    let sql = "-- header\r\nSELECT 1;\r\n\r\nSELECT 2;\r\n";
    assert_eq!(split_statements(sql), vec!["SELECT 1", "\nSELECT 2"]);
}
