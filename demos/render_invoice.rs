use chrono::NaiveDate;
use facture::core::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=facture=debug shows the totals and schedule events
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut numbers =
        DocumentNumberSequence::resume_after("FAC-2024-041").expect("last number is well formed");
    let issue_date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

    let lines = vec![
        LineItemBuilder::new("Formation Habilitation électrique", dec!(3), dec!(450))
            .unit("jour")
            .description("Session B0/H0V, 8 stagiaires")
            .build(),
        LineItemBuilder::new("Supports pédagogiques", dec!(8), dec!(12.45))
            .unit("stagiaire")
            .build(),
    ];
    let total_ttc = compute_totals(&lines)
        .expect("lines should be valid")
        .total_ttc;

    let installments = split_schedule(
        total_ttc,
        &[
            InstallmentPlan::new("Acompte 30 %", issue_date, dec!(30)),
            InstallmentPlan::new("Solde", NaiveDate::from_ymd_opt(2024, 10, 2).unwrap(), dec!(70)),
        ],
    )
    .expect("plan should sum to 100");

    let mut builder = DocumentBuilder::invoice(
        numbers.assign(issue_date).expect("issue date is in the current year"),
        issue_date,
    )
        .due_date(NaiveDate::from_ymd_opt(2024, 10, 2).unwrap())
        .invoice_status(InvoiceStatus::PartiallyPaid)
        .amount_paid(installments[0].amount)
        .client(
            ClientBuilder::new("Clinique Saint-Joseph")
                .address(AddressBuilder::new("Lyon", "69003", "FR").street("12 rue Garibaldi").build())
                .build(),
        )
        .payment_terms("Paiement à 30 jours par virement");
    for line in lines {
        builder = builder.add_line(line);
    }
    for entry in installments {
        builder = builder.add_installment(entry);
    }
    let invoice = builder.build().expect("invoice should be valid");

    let organization = OrganizationBuilder::new(
        "Form'Action SARL",
        AddressBuilder::new("Nantes", "44000", "FR").street("3 quai de la Fosse").build(),
    )
    .siret("98765432100021")
    .training_declaration("52440000000")
    .bank("FR7630006000011234567890189", Some("AGRIFRPP".into()))
    .build();
    let theme = ThemeConfig::default();
    let config = FactureConfig::default();
    let today = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();

    let ctx = match RenderContext::build(&invoice, &organization, &theme, &config, today) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("cannot render {}: {e}", invoice.number);
            std::process::exit(1);
        }
    };

    println!("Facture {}  ({})", invoice.number, invoice.status_str());
    println!("Émetteur: {}", ctx.organization.name);
    println!("Client:   {}", invoice.client.name);
    println!("---");
    for (line, totals) in invoice.lines.iter().zip(&ctx.totals.lines) {
        println!(
            "  {} x {} {} = {}",
            line.quantity,
            line.unit.as_deref().unwrap_or(""),
            line.designation,
            format_amount(totals.total_ht, &config.currency)
        );
    }
    println!("---");
    println!("Total HT:  {}", ctx.formatted.total_ht);
    for (rate, base, vat) in &ctx.formatted.vat_breakdown {
        println!("TVA {rate} sur {base}: {vat}");
    }
    println!("Total TTC: {}", ctx.formatted.total_ttc);
    if let Some(remaining) = &ctx.formatted.remaining_balance {
        println!("Reste à payer: {remaining}");
    }
    println!("--- Échéancier");
    for entry in &ctx.schedule.sorted_entries {
        println!(
            "  {} {:<14} {} ({})",
            entry.due_date,
            entry.label,
            format_amount(entry.amount, &config.currency),
            entry.payment_method.label()
        );
    }
    for warning in &ctx.schedule.warnings {
        println!("⚠ {warning}");
    }
    if let Some(Banner::Due(due)) = ctx.banner {
        println!("Échéance: {:?} ({} jours)", due.band, due.days);
    }
}
