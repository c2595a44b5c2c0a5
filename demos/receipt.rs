use receipt_pdf::receipt::{
    format_amount, format_cpf, render_receipt, Issuer, ReceiptConfig, ReceiptDate, ReceiptForm,
};
use receipt_pdf::ReceiptError;

fn main() -> Result<(), ReceiptError> {
    // what would have been typed into the form; the masks tidy up raw input
    let form = ReceiptForm {
        payer: "Maria da Conceição Albuquerque".to_string(),
        responsible: None,
        cpf: format_cpf("12345678900"),
        amount: format_amount("150000").unwrap_or_default(),
        surgery: "artroplastia total de joelho".to_string(),
        hospital: "Santa Casa de Misericórdia".to_string(),
        date: ReceiptDate::today(),
    };

    // A4 with Helvetica; a signature block goes under the date
    let mut config = ReceiptConfig::new();
    config.issuer(Issuer {
        name: "ANA LIMA".to_string(),
        cpf: format_cpf("11122233344"),
    });

    let receipt = render_receipt(&form, &config)?;
    println!(
        "{} body line(s), CPF clause wrapped: {}",
        receipt.body_lines, receipt.first_group_wrapped
    );

    // the file is named after the patient and the date
    let path = receipt.save_in(std::env::temp_dir())?;
    println!("saved {}", path.display());
    Ok(())
}
