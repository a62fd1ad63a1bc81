//! This bench test simulates rewriting a large AVR template made of many
//! sections, each with a header and a mix of row shapes.

#![allow(missing_docs)]

use std::fmt::Write;

use avrfix::{Document, Rules};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

/// Generates a template with `sections` sections of ten rows each
fn generate_template(sections: usize) -> String {
    let mut content = String::from("module.exports = [\n");
    for section in 1..=sections {
        writeln!(content, "  // Section {section}").unwrap();
        writeln!(
            content,
            "  {{ id: \"{section}-0\", description: \"Section {section}\" }},"
        )
        .unwrap();
        for row in 1..=10 {
            let required = match row % 4 {
                0 => "Yes".to_string(),
                1 => "No".to_string(),
                2 => (row * 10).to_string(),
                _ => format!("Free text requirement {row}"),
            };
            writeln!(
                content,
                "  {{ id: \"{section}-{row}\", description: \"Item {row}\", unit: \"-\", required: \"{required}\", proposedGuaranteed: \"\", remarks: \"\" }},"
            )
            .unwrap();
        }
        content.push('\n');
    }
    content.push_str("];\n");
    content
}

fn rewrite_template(c: &mut Criterion) {
    let rules = Rules::default();
    let content = generate_template(500);

    c.bench_function("parse and rewrite template", |b| {
        b.iter_batched(
            || content.clone(),
            |content| {
                let (document, _report) = Document::parse(&content, &rules).rewrite(&rules);
                document.render()
            },
            BatchSize::SmallInput,
        );
    });

    let converged = Document::parse(&content, &rules).rewrite(&rules).0.render();
    c.bench_function("rewrite converged template", |b| {
        b.iter(|| Document::parse(&converged, &rules).rewrite(&rules).1.is_clean());
    });
}

criterion_group!(benches, rewrite_template);
criterion_main!(benches);
