use crate::clipper::local_minima::LocalMinimaList;

#[test]
fn keeps_descending_y_order() {
    let mut lml = LocalMinimaList::new();
    lml.insert(10, 0, 1);
    lml.insert(30, 2, 3);
    lml.insert(20, 4, 5);
    let ys: Vec<i64> = lml.iter().map(|lm| lm.y).collect();
    assert_eq!(ys, vec![30, 20, 10]);
}

#[test]
fn cursor_consumes_in_order_and_rewinds() {
    let mut lml = LocalMinimaList::new();
    lml.insert(10, 0, 1);
    lml.insert(30, 2, 3);

    assert_eq!(lml.current().map(|lm| lm.y), Some(30));
    lml.pop();
    assert_eq!(lml.current().map(|lm| lm.y), Some(10));
    lml.pop();
    assert!(lml.current().is_none());
    assert!(lml.exhausted());

    lml.rewind();
    assert_eq!(lml.current().map(|lm| lm.y), Some(30));
}

#[test]
fn equal_y_minima_insert_before_existing() {
    let mut lml = LocalMinimaList::new();
    lml.insert(10, 0, 1);
    lml.insert(10, 2, 3);
    let bounds: Vec<usize> = lml.iter().map(|lm| lm.left_bound).collect();
    assert_eq!(bounds, vec![2, 0]);
}

#[test]
fn clear_resets_cursor() {
    let mut lml = LocalMinimaList::new();
    lml.insert(10, 0, 1);
    lml.pop();
    lml.clear();
    assert!(lml.is_empty());
    assert!(lml.current().is_none());
}
