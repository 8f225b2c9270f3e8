// Copyright (c) 2022 Gilad Naaman
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Scenario tests transliterated from the walks a sysrepo-style caller would
//! actually perform, one cursor operation at a time.

use xpath_nav::PathCursor;

const P1: &str = "/example-module:container/list[key1='keyA'][key2='keyB']/leaf";
const P2: &str = "/ietf-interfaces:interfaces/interface[name='eth0']/ietf-ip:ipv4/address[ip='192.168.2.100']/prefix-length";

#[test]
fn node_key_value_idx_walks_each_nodes_predicates() {
    let mut buf = P1.to_string();
    let mut cur = PathCursor::new();

    // No node selected yet: every lookup is absent.
    assert_eq!(cur.node_key_value_idx(&mut buf, 0), None);

    assert_eq!(cur.next_node_continue(), Some("container"));
    assert_eq!(cur.node_key_value_idx_continue(1), None);

    assert_eq!(cur.next_node_continue(), Some("list"));
    assert_eq!(cur.node_key_value_idx_continue(1), Some("keyB"));
    assert_eq!(cur.node_key_value_idx_continue(0), Some("keyA"));
    assert_eq!(cur.node_key_value_idx_continue(1), Some("keyB"));

    assert_eq!(cur.next_node_continue(), Some("leaf"));

    cur.recover();
    assert_eq!(buf, P1);
}

#[test]
fn key_value_looks_up_by_node_and_key_name() {
    let mut buf = P1.to_string();
    let mut cur = PathCursor::new();

    assert_eq!(cur.key_value(&mut buf, "abc", "xyz"), None);
    assert_eq!(cur.key_value_continue("container", "xyz"), None);
    assert_eq!(cur.key_value_continue("list", "key1"), Some("keyA"));
    assert_eq!(cur.key_value_continue("list", "key2"), Some("keyB"));
    assert_eq!(cur.key_value_continue("list", "key3"), None);
    assert_eq!(cur.key_value_continue("list", "key2"), Some("keyB"));
    assert_eq!(cur.key_value_continue("leaf", "abc"), None);

    cur.recover();
    assert_eq!(buf, P1);
}

#[test]
fn key_value_idx_looks_up_by_node_and_key_index() {
    let mut buf = P1.to_string();
    let mut cur = PathCursor::new();

    assert_eq!(cur.key_value_idx(&mut buf, 10, 5), None);
    assert_eq!(cur.key_value_idx_continue(0, 0), None);
    assert_eq!(cur.key_value_idx_continue(1, 0), Some("keyA"));
    assert_eq!(cur.key_value_idx_continue(1, 1), Some("keyB"));
    assert_eq!(cur.key_value_idx_continue(1, 2), None);
    assert_eq!(cur.key_value_idx_continue(1, 1), Some("keyB"));
    assert_eq!(cur.key_value_idx_continue(2, 2), None);

    cur.recover();
    assert_eq!(buf, P1);
}

#[test]
fn last_node_is_idempotent() {
    let mut buf = P1.to_string();
    let mut cur = PathCursor::new();

    assert_eq!(cur.last_node(&mut buf), Some("leaf"));
    assert_eq!(cur.last_node(&mut buf), Some("leaf"));

    cur.recover();
    assert_eq!(buf, P1);
}

#[test]
fn node_name_returns_final_segment_with_predicates() {
    assert_eq!(PathCursor::node_name(P1), "leaf");
    assert_eq!(
        PathCursor::node_name("/example-module:container/list[key1='keyA'][key2='keyB']"),
        "list[key1='keyA'][key2='keyB']"
    );
}

#[test]
fn node_name_eq_compares_bare_final_segment() {
    assert!(PathCursor::node_name_eq(P1, "leaf"));
    assert!(!PathCursor::node_name_eq(P1, "/leaf"));
    assert!(PathCursor::node_name_eq(
        "/example-module:container/list[key1='keyA'][key2='keyB']",
        "list"
    ));
    assert!(!PathCursor::node_name_eq(
        "/example-module:container/list[key1='keyA'][key2='keyB']",
        "list[key1='keyA'][key2='keyB']"
    ));
}

#[test]
fn augmented_model_path_end_to_end() {
    let mut buf = P2.to_string();
    let mut cur = PathCursor::new();

    assert_eq!(cur.next_node(&mut buf), Some("interfaces"));
    assert_eq!(cur.key_value_continue("address", "ip"), Some("192.168.2.100"));
    assert_eq!(cur.node_continue("interface"), Some("interface"));
    assert_eq!(cur.next_node_with_ns_continue(), Some("ietf-ip:ipv4"));
    assert_eq!(cur.last_node_continue(), Some("prefix-length"));

    cur.recover();
    assert_eq!(buf, P2);
}

#[test]
fn leaving_a_scan_unfinished_never_corrupts_the_buffer() {
    let mut buf = P1.to_string();
    {
        let mut cur = PathCursor::new();
        assert_eq!(cur.next_node(&mut buf), Some("container"));
        assert_eq!(cur.next_node_continue(), Some("list"));
        // `cur` goes out of scope here without an explicit `recover()` call.
    }
    assert_eq!(buf, P1);
}
