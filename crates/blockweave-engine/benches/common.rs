// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_native_document(sections: usize) -> String {
    let base = "⟦doc-heading⟧Section\nSome paragraph content.\n⟦blockquote⟧> A quote\n⟦unordered-0⟧- Bullet point\n⟦checklist-1⟧- [ ] Nested task\n⟦code-rust⟧let value = 42;\n⟦horizontal-rule⟧\n";
    base.repeat(sections)
}
