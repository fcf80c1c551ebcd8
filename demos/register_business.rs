//! Walks a business registration through the wizard.
//!
//! Run with: `cargo run --example register_business --features wizard`

use konto::core::*;
use konto::wizard::*;

fn show(errors: &[ValidationError]) {
    for e in errors {
        println!("  ✗ {e}");
    }
}

fn main() {
    let mut wizard = RegistrationWizard::new(AccountType::Business, FormRules::default());

    let d = wizard.draft_mut();
    d.set_text(Field::Email, "biuro@kwiaciarnia.pl");
    d.set_text(Field::Password, "bezpieczne1");
    d.set_text(Field::ConfirmPassword, "bezpieczne1");
    println!("{} -> {:?}", wizard.step(), wizard.next());

    let d = wizard.draft_mut();
    d.set_text(Field::CompanyName, "Kwiaciarnia Róża");
    d.set_text(Field::Nip, "526-000-12-47");
    d.toggle_category("ogród");

    println!("On blur, NIP:");
    show(&wizard.blur(Field::Nip));

    if let Err(e) = wizard.next() {
        println!("{} blocked: {e}", wizard.step());
        show(e.field_errors());
    }

    wizard.draft_mut().set_text(Field::Nip, "526-000-12-46");
    println!("{} -> {:?}", wizard.step(), wizard.next());

    let d = wizard.draft_mut();
    d.set_text(Field::City, "Kraków");
    d.set_text(Field::PostalCode, "30-001");
    d.set_terms_accepted(true);

    match wizard.finish() {
        Ok(RegistrationForm::Business(acc)) => {
            println!("Ready to submit {} (NIP {})", acc.company_name, acc.nip);
        }
        Ok(other) => println!("Unexpected form: {other:?}"),
        Err(e) => {
            println!("Cannot submit: {e}");
            show(e.field_errors());
        }
    }
}
