//! Final assembly of the builder's emitted lines into a complete IR
//! program (§6.2). One function, `main`, is all this language's Non-goals
//! (§1) allow, so there is no multi-function joining to do here — just
//! wrapping the body in `fun @main(): i32 { ... }`.

pub(super) fn assemble(func_name: &str, lines: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("fun @{func_name}(): i32 {{\n"));
    for line in lines {
        if line.ends_with(':') {
            out.push_str(line);
        } else {
            out.push_str("  ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}
