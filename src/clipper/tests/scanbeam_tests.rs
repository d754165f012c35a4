use crate::clipper::scanbeam::Scanbeam;

#[test]
fn pops_largest_first() {
    let mut sb = Scanbeam::new();
    sb.insert(10);
    sb.insert(5);
    sb.insert(15);
    assert_eq!(sb.pop(), Some(15));
    assert_eq!(sb.pop(), Some(10));
    assert_eq!(sb.pop(), Some(5));
    assert_eq!(sb.pop(), None);
}

#[test]
fn ignores_duplicates() {
    let mut sb = Scanbeam::new();
    sb.insert(7);
    sb.insert(7);
    sb.insert(7);
    assert_eq!(sb.pop(), Some(7));
    assert!(sb.is_empty());
}

#[test]
fn clear_empties_the_queue() {
    let mut sb = Scanbeam::new();
    sb.insert(1);
    sb.insert(2);
    sb.clear();
    assert!(sb.is_empty());
    assert_eq!(sb.pop(), None);
}

#[test]
fn handles_negative_levels() {
    let mut sb = Scanbeam::new();
    sb.insert(-5);
    sb.insert(3);
    sb.insert(-10);
    assert_eq!(sb.pop(), Some(3));
    assert_eq!(sb.pop(), Some(-5));
    assert_eq!(sb.pop(), Some(-10));
}
