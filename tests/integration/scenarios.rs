// tests/integration/scenarios.rs

//! End-to-end scenarios driven straight through tokenizing and dispatch
//! against an in-process store, asserting the exact reply bytes a client
//! would see on the wire.

use bytes::BytesMut;
use exodb::core::commands::dispatch;
use exodb::core::protocol::tokenize;
use exodb::core::storage::Store;
use std::path::PathBuf;

fn store() -> Store {
    Store::new(PathBuf::from("/nonexistent"))
}

fn run_line(store: &mut Store, line: &str) -> Vec<u8> {
    let tokens = tokenize(line.as_bytes()).expect("tokenizer failed");
    let reply = dispatch(&tokens, store);
    let mut buf = BytesMut::new();
    reply.encode(&mut buf);
    buf.to_vec()
}

#[test]
fn scenario_a_basic_string_round_trip() {
    let mut s = store();
    assert_eq!(run_line(&mut s, "SET greeting hello"), b"+OK\r\n");
    assert_eq!(run_line(&mut s, "GET greeting"), b"$5\r\nhello\r\n");
    assert_eq!(run_line(&mut s, "GET missing"), b"$-1\r\n");
}

#[test]
fn scenario_b_set_with_ttl_and_options() {
    let mut s = store();
    assert_eq!(run_line(&mut s, "SET k v EX 100"), b"+OK\r\n");
    assert_eq!(run_line(&mut s, "SET k v2 NX"), b"$-1\r\n");
    assert_eq!(run_line(&mut s, "SET other v XX"), b"$-1\r\n");
    assert_eq!(
        run_line(&mut s, "SET k v EX 0"),
        b"-ERR Syntax error\r\n".as_ref()
    );
    assert_eq!(
        run_line(&mut s, "SET k v EX 10 PX 10"),
        b"-ERR Syntax error\r\n".as_ref()
    );
}

#[test]
fn scenario_c_bit_operations() {
    let mut s = store();
    assert_eq!(run_line(&mut s, "SETBIT flags 7 1"), b":0\r\n");
    assert_eq!(run_line(&mut s, "GETBIT flags 7"), b":1\r\n");
    assert_eq!(run_line(&mut s, "GETBIT flags 6"), b":0\r\n");
    assert_eq!(run_line(&mut s, "SETBIT flags 7 0"), b":1\r\n");
}

#[test]
fn scenario_d_sorted_set_lifecycle() {
    let mut s = store();
    assert_eq!(run_line(&mut s, "ZADD ranks 1 alice"), b":1\r\n");
    assert_eq!(run_line(&mut s, "ZADD ranks 2 bob"), b":1\r\n");
    assert_eq!(run_line(&mut s, "ZADD ranks 3 carol"), b":1\r\n");
    assert_eq!(run_line(&mut s, "ZCARD ranks"), b":3\r\n");
    assert_eq!(run_line(&mut s, "ZCOUNT ranks 2 3"), b":2\r\n");
    assert_eq!(
        run_line(&mut s, "ZRANGE ranks 0 -1 WITHSCORES"),
        b"*6\r\n$5\r\nalice\r\n$1\r\n1\r\n$3\r\nbob\r\n$1\r\n2\r\n$5\r\ncarol\r\n$1\r\n3\r\n"
    );
}

#[test]
fn scenario_e_type_errors() {
    let mut s = store();
    assert_eq!(run_line(&mut s, "SET t hello"), b"+OK\r\n");
    assert_eq!(
        run_line(&mut s, "ZADD t 1 x"),
        b"-ERR Incorrect type\r\n".as_ref()
    );
    assert_eq!(
        run_line(&mut s, "GETBIT t abc"),
        b"-ERR Syntax error\r\n".as_ref()
    );
}

#[test]
fn scenario_f_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snap.exodb");

    let mut s = Store::new(path.clone());
    assert_eq!(run_line(&mut s, "SET a 1"), b"+OK\r\n");
    assert_eq!(run_line(&mut s, "ZADD z 1 x"), b":1\r\n");
    assert_eq!(run_line(&mut s, "SAVE"), b"+OK\r\n");

    let mut reloaded = Store::new(path);
    reloaded.load().unwrap();
    assert_eq!(run_line(&mut reloaded, "GET a"), b"$1\r\n1\r\n");
    assert_eq!(run_line(&mut reloaded, "ZCARD z"), b":1\r\n");
}

#[test]
fn unknown_command_and_tokenizing_errors() {
    let mut s = store();
    assert_eq!(
        run_line(&mut s, "FROB x"),
        b"-ERR Unknown command FROB\r\n".as_ref()
    );
    let err = tokenize(br#"SET k "unterminated"#).unwrap_err();
    assert!(format!("{err}").contains("Tokenizing error"));
}
