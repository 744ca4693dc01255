use super::*;

#[test]
fn counts_context_lifecycle() {
    let backend = HeadlessBackend::default();
    let px = PixelBuffer::zeroed(3, 2).unwrap();

    let mut ctx = backend.create(&px).unwrap();
    backend.present(&mut ctx, &px).unwrap();
    backend.present(&mut ctx, &px).unwrap();
    backend.destroy(ctx);

    assert_eq!(
        backend.stats(),
        HeadlessStats {
            created: 1,
            destroyed: 1,
            presented: 2
        }
    );
    assert_eq!(backend.stats().live(), 0);
    assert_eq!(backend.name(), "headless");
}

#[test]
fn rejects_foreign_context() {
    let backend = HeadlessBackend::new("a");
    let px = PixelBuffer::zeroed(1, 1).unwrap();
    let mut foreign: PresentContext = Box::new(7u32);
    assert!(backend.present(&mut foreign, &px).is_err());
}

#[test]
fn rejects_mismatched_geometry() {
    let backend = HeadlessBackend::new("a");
    let small = PixelBuffer::zeroed(1, 1).unwrap();
    let big = PixelBuffer::zeroed(2, 2).unwrap();
    let mut ctx = backend.create(&small).unwrap();
    assert!(backend.present(&mut ctx, &big).is_err());
    backend.destroy(ctx);
}
