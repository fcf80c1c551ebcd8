use criterion::{Criterion, black_box, criterion_group, criterion_main};

use konto::core::*;

fn business_draft() -> RegistrationDraft {
    DraftBuilder::business("biuro@firma.pl", "bezpieczne1")
        .company_name("Firma Sp. z o.o.")
        .nip("526-000-12-46")
        .category("motoryzacja")
        .category("usługi")
        .location("Warszawa", "00-001")
        .accept_terms()
        .draft()
}

fn bench_validate_nip(c: &mut Criterion) {
    c.bench_function("validate_nip bare", |b| {
        b.iter(|| validate_nip(black_box("5260001246")))
    });
    c.bench_function("validate_nip formatted", |b| {
        b.iter(|| validate_nip(black_box("526-000-12-46")))
    });
    c.bench_function("validate_nip garbage", |b| {
        b.iter(|| validate_nip(black_box("not a tax id at all, just text")))
    });
}

fn bench_validate_registration(c: &mut Criterion) {
    let draft = business_draft();
    let rules = FormRules::default();
    c.bench_function("validate_registration business", |b| {
        b.iter(|| validate_registration(black_box(&draft), &rules))
    });
    c.bench_function("to_form business", |b| {
        b.iter(|| black_box(&draft).to_form(&rules))
    });
}

criterion_group!(benches, bench_validate_nip, bench_validate_registration);
criterion_main!(benches);
