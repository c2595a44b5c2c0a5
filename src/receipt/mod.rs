//! Surgical instrumentation receipts.
//!
//! A [`ReceiptForm`] holds what was typed into the form. It turns into styled
//! [`Segment`]s for the line breaker and into a file name; [`render_receipt`]
//! sets the whole thing on one page.

mod fields;
mod render;

pub use fields::*;
pub use render::*;

use crate::latin::strip_diacritics;
use crate::layout::{GroupId, Segment};
use crate::ReceiptError;

/// Group tying the CPF label, number and comma together
pub const CPF_GROUP: &str = "cpf";
/// Group keeping "R$" next to the amount
pub const AMOUNT_GROUP: &str = "amount";
const NAME_GROUP: &str = "name";
const SUBJECT_GROUP: &str = "subject";
const HOSPITAL_GROUP: &str = "hospital";

const FILE_NAME_LIMIT: usize = 40;
const CPF_DIGITS: usize = 11;

/// What the receipt is about, as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptForm {
    /// The patient
    pub payer: String,
    /// Who pays on the patient's behalf, if anyone
    pub responsible: Option<String>,
    /// Masked or bare, it needs all 11 digits
    pub cpf: String,
    /// Already masked, `1.234,56`
    pub amount: String,
    /// Always required, even when the surgery line names the patient
    pub surgery: String,
    pub hospital: String,
    pub date: ReceiptDate,
}

impl ReceiptForm {
    /// Checks the fields in the order they appear on the form and reports the
    /// first one that is blank. A responsible person given as `Some` must be
    /// named, and the CPF needs all 11 digits.
    pub fn validate(&self) -> Result<(), ReceiptError> {
        if self.responsible.is_some() && self.responsible().is_none() {
            return Err(ReceiptError::MissingField("responsible"));
        }
        if self.cpf.chars().filter(char::is_ascii_digit).count() != CPF_DIGITS {
            return Err(ReceiptError::InvalidCpf(self.cpf.clone()));
        }

        let required = [
            ("payer", self.payer.as_str()),
            ("amount", self.amount.as_str()),
            ("surgery", self.surgery.as_str()),
            ("hospital", self.hospital.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ReceiptError::MissingField(field));
            }
        }
        Ok(())
    }

    /// The responsible person, when one was actually filled in
    pub fn responsible(&self) -> Option<&str> {
        self.responsible
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Who the receipt is made out to
    pub fn issued_to(&self) -> String {
        clean(self.responsible().unwrap_or(&self.payer))
    }

    /// What the surgery line names: the patient when someone else pays,
    /// otherwise the surgery itself
    pub fn subject(&self) -> String {
        match self.responsible() {
            Some(_) => clean(&self.payer),
            None => clean(&self.surgery),
        }
    }

    /// The receipt body. Names keep their trailing punctuation with them, the
    /// CPF clause and the amount are each kept on one line.
    pub fn segments(&self) -> Vec<Segment> {
        let name = GroupId::named(NAME_GROUP);
        let cpf = GroupId::named(CPF_GROUP);
        let amount = GroupId::named(AMOUNT_GROUP);
        let subject = GroupId::named(SUBJECT_GROUP);
        let hospital = GroupId::named(HOSPITAL_GROUP);

        vec![
            Segment::normal("Recebi de "),
            Segment::bold(self.issued_to()).in_group(name.clone()),
            Segment::normal(",").in_group(name),
            Segment::normal(" "),
            Segment::normal("CPF.: ").in_group(cpf.clone()),
            Segment::bold(self.cpf.trim()).in_group(cpf.clone()),
            Segment::normal(", ").in_group(cpf),
            Segment::normal("o valor de "),
            Segment::bold(format!("R$ {}", self.amount.trim())).in_group(amount),
            Segment::normal(
                " referente ao serviço prestado da instrumentação cirúrgica para cirurgia de ",
            ),
            Segment::bold(self.subject()).in_group(subject.clone()),
            Segment::normal(",").in_group(subject),
            Segment::normal(" realizada no hospital "),
            Segment::bold(clean(&self.hospital)).in_group(hospital.clone()),
            Segment::normal(".").in_group(hospital),
        ]
    }

    /// `Recibo_<PAYER>_<dd>-<MONTH>-<yyyy>.pdf`, safe for any file system
    pub fn file_name(&self) -> String {
        let upper = strip_diacritics(&clean(&self.payer));
        let kept: String = upper
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-' || ch.is_whitespace())
            .collect();
        let mut base: String = kept
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .chars()
            .take(FILE_NAME_LIMIT)
            .collect();
        if base.is_empty() {
            base = "RECIBO".to_string();
        }

        format!(
            "Recibo_{}_{:02}-{}-{}.pdf",
            base,
            self.date.day(),
            self.date.month().name(),
            self.date.year()
        )
    }
}

fn clean(value: &str) -> String {
    to_upper_pt(&strip_trailing_punctuation(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tokenize;
    use test_case::test_case;

    fn form() -> ReceiptForm {
        ReceiptForm {
            payer: "Maria da Conceição,".to_string(),
            responsible: None,
            cpf: "123.456.789-00".to_string(),
            amount: "1.500,00".to_string(),
            surgery: "artroscopia de joelho.".to_string(),
            hospital: "Santa Casa".to_string(),
            date: ReceiptDate::new(5, Month::Marco, 2025).expect("valid date"),
        }
    }

    fn body(form: &ReceiptForm) -> String {
        form.segments().iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn body_names_the_surgery_without_a_responsible() {
        assert_eq!(
            body(&form()),
            "Recebi de MARIA DA CONCEIÇÃO, CPF.: 123.456.789-00, o valor de R$ 1.500,00 \
             referente ao serviço prestado da instrumentação cirúrgica para cirurgia de \
             ARTROSCOPIA DE JOELHO, realizada no hospital SANTA CASA."
        );
    }

    #[test]
    fn body_names_the_patient_when_someone_else_pays() {
        let mut form = form();
        form.responsible = Some("José Pereira".to_string());
        let text = body(&form);
        assert!(text.starts_with("Recebi de JOSÉ PEREIRA, CPF.: "));
        assert!(text.contains("para cirurgia de MARIA DA CONCEIÇÃO, realizada"));
    }

    #[test]
    fn blank_responsible_is_not_named() {
        let mut form = form();
        form.responsible = Some("  ".to_string());
        assert_eq!(form.issued_to(), "MARIA DA CONCEIÇÃO");
        assert_eq!(form.subject(), "ARTROSCOPIA DE JOELHO");
        assert!(matches!(
            form.validate(),
            Err(ReceiptError::MissingField("responsible"))
        ));
    }

    #[test]
    fn cpf_clause_is_one_group() {
        let tokens = tokenize(&form().segments());
        let cpf = GroupId::named(CPF_GROUP);
        let grouped: String = tokens
            .iter()
            .filter(|t| t.group.as_ref() == Some(&cpf))
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(grouped, "CPF.: 123.456.789-00, ");
    }

    #[test]
    fn punctuation_stays_with_the_name_before_it() {
        let tokens = tokenize(&form().segments());
        let full_stop = tokens.last().expect("tokens");
        assert_eq!(full_stop.text, ".");
        assert_eq!(full_stop.group, Some(GroupId::named(HOSPITAL_GROUP)));
    }

    #[test_case(|f: &mut ReceiptForm| f.payer.clear(), "payer" ; "payer")]
    #[test_case(|f: &mut ReceiptForm| f.amount.clear(), "amount" ; "amount")]
    #[test_case(|f: &mut ReceiptForm| f.hospital.clear(), "hospital" ; "hospital")]
    #[test_case(|f: &mut ReceiptForm| f.surgery.clear(), "surgery" ; "surgery")]
    fn missing_fields_are_reported(blank: fn(&mut ReceiptForm), field: &str) {
        let mut form = form();
        blank(&mut form);
        match form.validate() {
            Err(ReceiptError::MissingField(missing)) => assert_eq!(missing, field),
            other => panic!("expected a missing {field}, got {other:?}"),
        }
    }

    #[test]
    fn fields_are_checked_in_form_order() {
        let mut form = form();
        form.responsible = Some(String::new());
        form.cpf.clear();
        form.payer.clear();
        assert!(matches!(
            form.validate(),
            Err(ReceiptError::MissingField("responsible"))
        ));

        form.responsible = None;
        assert!(matches!(form.validate(), Err(ReceiptError::InvalidCpf(_))));

        form.cpf = "123.456.789-00".to_string();
        assert!(matches!(
            form.validate(),
            Err(ReceiptError::MissingField("payer"))
        ));
    }

    #[test_case("" ; "blank")]
    #[test_case("1" ; "one digit")]
    #[test_case("123.456.789-0" ; "ten digits")]
    #[test_case("123.456.789-001" ; "twelve digits")]
    #[test_case("abc.def.ghi-jk" ; "no digits")]
    fn incomplete_cpfs_are_rejected(cpf: &str) {
        let mut form = form();
        form.cpf = cpf.to_string();
        match form.validate() {
            Err(ReceiptError::InvalidCpf(rejected)) => assert_eq!(rejected, cpf),
            other => panic!("expected {cpf:?} to be rejected, got {other:?}"),
        }
    }

    #[test_case("12345678900" ; "digits only")]
    #[test_case("123.456.789-00" ; "masked")]
    fn complete_cpfs_pass(cpf: &str) {
        let mut form = form();
        form.cpf = cpf.to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn surgery_is_required_even_when_someone_else_pays() {
        let mut form = form();
        form.surgery.clear();
        form.responsible = Some("José".to_string());
        assert!(matches!(
            form.validate(),
            Err(ReceiptError::MissingField("surgery"))
        ));
    }

    #[test]
    fn file_name_drops_accents_from_the_name() {
        assert_eq!(form().file_name(), "Recibo_MARIA_DA_CONCEICAO_05-MARÇO-2025.pdf");

        let mut form = form();
        form.payer = "Šárka Žižková".to_string();
        assert_eq!(form.file_name(), "Recibo_SARKA_ZIZKOVA_05-MARÇO-2025.pdf");
    }

    #[test]
    fn file_name_is_limited_and_never_empty() {
        let mut form = form();
        form.payer = "Ana ".repeat(20);
        let name = form.file_name();
        let base = name
            .strip_prefix("Recibo_")
            .and_then(|rest| rest.split("_05-").next())
            .expect("file name shape");
        assert_eq!(base.chars().count(), 40);

        form.payer = "???".to_string();
        assert_eq!(form.file_name(), "Recibo_RECIBO_05-MARÇO-2025.pdf");
    }
}
