//! Extraction contract: what the oracle must fill in for a static analysis
//!
//! Every attribute defaults to "not found". The deterministic layer never
//! invents evidence, it only reads what the oracle returned.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use crate::patterns::{is_absent, NOT_FOUND};

/// Compliance-relevant facts extracted from a merchant site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContentExtraction {
    // Section 1: Company Information
    pub company_name: Option<String>,
    pub registration_number: Option<String>,
    pub legal_address: Option<String>,
    pub vat_number: Option<String>,
    pub merchant_outlet_location: Option<String>,
    pub has_license_info: bool,
    pub license_number: Option<String>,
    pub regulator_link: Option<String>,

    // Section 2: Contacts
    pub support_email: Option<String>,
    pub phone_number: Option<String>,
    pub physical_address: Option<String>,
    pub has_contact_page: bool,

    // Section 3: Policies
    pub has_terms_conditions: bool,
    pub has_privacy_policy: bool,
    pub has_refund_policy: bool,
    pub has_cancellation_policy: bool,
    pub has_payment_policy: bool,
    pub policies_accessible_from_all_pages: bool,
    pub policy_mentions_service_conditions: bool,
    pub policy_mentions_cancellation_terms: bool,
    pub policy_mentions_refund_terms: bool,
    #[serde(deserialize_with = "lenient_days")]
    pub refund_period_days: Option<u32>,
    pub policy_mentions_user_restrictions: bool,
    pub policy_mentions_company_name: bool,
    pub site_primary_language: Option<String>,

    // Section 4: Product/Service Description
    pub has_product_description: bool,
    pub prices_in_purchase_currency: bool,
    pub all_fees_disclosed: bool,
    pub transparent_purchase_process: bool,

    // Section 5: Checkout
    pub shows_final_price: bool,
    pub shows_merchant_location_at_checkout: bool,
    pub has_terms_agreement_checkbox: bool,
    pub payment_methods_mentioned: Vec<String>,

    // Section 6: Receipt Information
    pub has_receipt_info: bool,

    // Section 8: Mobile Compliance
    pub has_mobile_responsive: bool,
}

impl SiteContentExtraction {
    /// Decode an oracle answer. `null` members are treated as missing.
    pub fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
        if let Value::Object(map) = &mut value {
            map.retain(|_, member| !member.is_null());
        }
        serde_json::from_value(value)
    }

    /// Read one attribute
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        use Field::*;
        match field {
            CompanyName => FieldValue::Text(self.company_name.as_deref()),
            RegistrationNumber => FieldValue::Text(self.registration_number.as_deref()),
            LegalAddress => FieldValue::Text(self.legal_address.as_deref()),
            VatNumber => FieldValue::Text(self.vat_number.as_deref()),
            MerchantOutletLocation => FieldValue::Text(self.merchant_outlet_location.as_deref()),
            HasLicenseInfo => FieldValue::Flag(self.has_license_info),
            LicenseNumber => FieldValue::Text(self.license_number.as_deref()),
            RegulatorLink => FieldValue::Text(self.regulator_link.as_deref()),
            SupportEmail => FieldValue::Text(self.support_email.as_deref()),
            PhoneNumber => FieldValue::Text(self.phone_number.as_deref()),
            PhysicalAddress => FieldValue::Text(self.physical_address.as_deref()),
            HasContactPage => FieldValue::Flag(self.has_contact_page),
            HasTermsConditions => FieldValue::Flag(self.has_terms_conditions),
            HasPrivacyPolicy => FieldValue::Flag(self.has_privacy_policy),
            HasRefundPolicy => FieldValue::Flag(self.has_refund_policy),
            HasCancellationPolicy => FieldValue::Flag(self.has_cancellation_policy),
            HasPaymentPolicy => FieldValue::Flag(self.has_payment_policy),
            PoliciesAccessibleFromAllPages => {
                FieldValue::Flag(self.policies_accessible_from_all_pages)
            }
            PolicyMentionsServiceConditions => {
                FieldValue::Flag(self.policy_mentions_service_conditions)
            }
            PolicyMentionsCancellationTerms => {
                FieldValue::Flag(self.policy_mentions_cancellation_terms)
            }
            PolicyMentionsRefundTerms => FieldValue::Flag(self.policy_mentions_refund_terms),
            RefundPeriodDays => FieldValue::Days(self.refund_period_days),
            PolicyMentionsUserRestrictions => {
                FieldValue::Flag(self.policy_mentions_user_restrictions)
            }
            PolicyMentionsCompanyName => FieldValue::Flag(self.policy_mentions_company_name),
            SitePrimaryLanguage => FieldValue::Text(self.site_primary_language.as_deref()),
            HasProductDescription => FieldValue::Flag(self.has_product_description),
            PricesInPurchaseCurrency => FieldValue::Flag(self.prices_in_purchase_currency),
            AllFeesDisclosed => FieldValue::Flag(self.all_fees_disclosed),
            TransparentPurchaseProcess => FieldValue::Flag(self.transparent_purchase_process),
            ShowsFinalPrice => FieldValue::Flag(self.shows_final_price),
            ShowsMerchantLocationAtCheckout => {
                FieldValue::Flag(self.shows_merchant_location_at_checkout)
            }
            HasTermsAgreementCheckbox => FieldValue::Flag(self.has_terms_agreement_checkbox),
            PaymentMethodsMentioned => FieldValue::List(&self.payment_methods_mentioned),
            HasReceiptInfo => FieldValue::Flag(self.has_receipt_info),
            HasMobileResponsive => FieldValue::Flag(self.has_mobile_responsive),
        }
    }

    /// Company name for the report header
    pub fn company_name_or_unknown(&self) -> String {
        match self.value(Field::CompanyName) {
            FieldValue::Text(Some(name)) if !is_absent(name) => name.trim().to_string(),
            _ => "Unknown".to_string(),
        }
    }
}

/// Day counts arrive as `14`, `14.0` or `"14"`; negative, fractional or
/// unparseable counts are treated as not stated rather than failing the record.
fn lenient_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(days_from_value))
}

fn days_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(days) => u32::try_from(days).ok(),
            None => number
                .as_f64()
                .filter(|days| days.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(days))
                .map(|days| days as u32),
        },
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// One attribute of [`SiteContentExtraction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CompanyName,
    RegistrationNumber,
    LegalAddress,
    VatNumber,
    MerchantOutletLocation,
    HasLicenseInfo,
    LicenseNumber,
    RegulatorLink,
    SupportEmail,
    PhoneNumber,
    PhysicalAddress,
    HasContactPage,
    HasTermsConditions,
    HasPrivacyPolicy,
    HasRefundPolicy,
    HasCancellationPolicy,
    HasPaymentPolicy,
    PoliciesAccessibleFromAllPages,
    PolicyMentionsServiceConditions,
    PolicyMentionsCancellationTerms,
    PolicyMentionsRefundTerms,
    RefundPeriodDays,
    PolicyMentionsUserRestrictions,
    PolicyMentionsCompanyName,
    SitePrimaryLanguage,
    HasProductDescription,
    PricesInPurchaseCurrency,
    AllFeesDisclosed,
    TransparentPurchaseProcess,
    ShowsFinalPrice,
    ShowsMerchantLocationAtCheckout,
    HasTermsAgreementCheckbox,
    PaymentMethodsMentioned,
    HasReceiptInfo,
    HasMobileResponsive,
}

/// Shape of an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Flag,
    Text,
    Days,
    List,
}

impl Field {
    /// Every attribute, in schema order
    pub const ALL: [Field; 35] = [
        Field::CompanyName,
        Field::RegistrationNumber,
        Field::LegalAddress,
        Field::VatNumber,
        Field::MerchantOutletLocation,
        Field::HasLicenseInfo,
        Field::LicenseNumber,
        Field::RegulatorLink,
        Field::SupportEmail,
        Field::PhoneNumber,
        Field::PhysicalAddress,
        Field::HasContactPage,
        Field::HasTermsConditions,
        Field::HasPrivacyPolicy,
        Field::HasRefundPolicy,
        Field::HasCancellationPolicy,
        Field::HasPaymentPolicy,
        Field::PoliciesAccessibleFromAllPages,
        Field::PolicyMentionsServiceConditions,
        Field::PolicyMentionsCancellationTerms,
        Field::PolicyMentionsRefundTerms,
        Field::RefundPeriodDays,
        Field::PolicyMentionsUserRestrictions,
        Field::PolicyMentionsCompanyName,
        Field::SitePrimaryLanguage,
        Field::HasProductDescription,
        Field::PricesInPurchaseCurrency,
        Field::AllFeesDisclosed,
        Field::TransparentPurchaseProcess,
        Field::ShowsFinalPrice,
        Field::ShowsMerchantLocationAtCheckout,
        Field::HasTermsAgreementCheckbox,
        Field::PaymentMethodsMentioned,
        Field::HasReceiptInfo,
        Field::HasMobileResponsive,
    ];

    /// Serialized attribute name
    pub fn name(&self) -> &'static str {
        use Field::*;
        match self {
            CompanyName => "company_name",
            RegistrationNumber => "registration_number",
            LegalAddress => "legal_address",
            VatNumber => "vat_number",
            MerchantOutletLocation => "merchant_outlet_location",
            HasLicenseInfo => "has_license_info",
            LicenseNumber => "license_number",
            RegulatorLink => "regulator_link",
            SupportEmail => "support_email",
            PhoneNumber => "phone_number",
            PhysicalAddress => "physical_address",
            HasContactPage => "has_contact_page",
            HasTermsConditions => "has_terms_conditions",
            HasPrivacyPolicy => "has_privacy_policy",
            HasRefundPolicy => "has_refund_policy",
            HasCancellationPolicy => "has_cancellation_policy",
            HasPaymentPolicy => "has_payment_policy",
            PoliciesAccessibleFromAllPages => "policies_accessible_from_all_pages",
            PolicyMentionsServiceConditions => "policy_mentions_service_conditions",
            PolicyMentionsCancellationTerms => "policy_mentions_cancellation_terms",
            PolicyMentionsRefundTerms => "policy_mentions_refund_terms",
            RefundPeriodDays => "refund_period_days",
            PolicyMentionsUserRestrictions => "policy_mentions_user_restrictions",
            PolicyMentionsCompanyName => "policy_mentions_company_name",
            SitePrimaryLanguage => "site_primary_language",
            HasProductDescription => "has_product_description",
            PricesInPurchaseCurrency => "prices_in_purchase_currency",
            AllFeesDisclosed => "all_fees_disclosed",
            TransparentPurchaseProcess => "transparent_purchase_process",
            ShowsFinalPrice => "shows_final_price",
            ShowsMerchantLocationAtCheckout => "shows_merchant_location_at_checkout",
            HasTermsAgreementCheckbox => "has_terms_agreement_checkbox",
            PaymentMethodsMentioned => "payment_methods_mentioned",
            HasReceiptInfo => "has_receipt_info",
            HasMobileResponsive => "has_mobile_responsive",
        }
    }

    pub fn kind(&self) -> FieldKind {
        use Field::*;
        match self {
            CompanyName | RegistrationNumber | LegalAddress | VatNumber
            | MerchantOutletLocation | LicenseNumber | RegulatorLink | SupportEmail
            | PhoneNumber | PhysicalAddress | SitePrimaryLanguage => FieldKind::Text,
            RefundPeriodDays => FieldKind::Days,
            PaymentMethodsMentioned => FieldKind::List,
            _ => FieldKind::Flag,
        }
    }

    /// Instruction the oracle sees for this attribute
    pub fn description(&self) -> &'static str {
        use Field::*;
        match self {
            CompanyName => "Full legal company name found on the website",
            RegistrationNumber => "Company registration / incorporation number",
            LegalAddress => "Legal / registered address of the company",
            VatNumber => "VAT or tax identification number",
            MerchantOutletLocation => "Physical location where business decisions are made",
            HasLicenseInfo => "Is there any licensing information (regulator, license number)?",
            LicenseNumber => "License number if found",
            RegulatorLink => "Link or mention of the regulatory authority",
            SupportEmail => "Support or contact email address",
            PhoneNumber => "Contact phone number",
            PhysicalAddress => "Physical / mailing address (may differ from legal address)",
            HasContactPage => "Is there a dedicated Contact Us page or section?",
            HasTermsConditions => "Is there a link or page for Terms & Conditions?",
            HasPrivacyPolicy => "Is there a link or page for Privacy Policy?",
            HasRefundPolicy => "Is there a link or page for Refund / Return Policy?",
            HasCancellationPolicy => "Is there a link or page for Cancellation Policy?",
            HasPaymentPolicy => "Is there a link or page for Payment Policy?",
            PoliciesAccessibleFromAllPages => {
                "Are policy links present in footer or menu, accessible from every page?"
            }
            PolicyMentionsServiceConditions => {
                "Do policies describe conditions for providing services or selling goods?"
            }
            PolicyMentionsCancellationTerms => "Do policies describe cancellation conditions?",
            PolicyMentionsRefundTerms => "Do policies describe refund terms, deadlines, and rules?",
            RefundPeriodDays => "Number of days for refund if mentioned",
            PolicyMentionsUserRestrictions => {
                "Do policies mention any user restrictions (age, geography, etc.)?"
            }
            PolicyMentionsCompanyName => {
                "Do policies explicitly mention the company name as the contracting party?"
            }
            SitePrimaryLanguage => "Primary language of the website content",
            HasProductDescription => "Are products or services described in detail?",
            PricesInPurchaseCurrency => "Are prices shown in the purchase/local currency?",
            AllFeesDisclosed => {
                "Are all fees, commissions, and additional charges clearly disclosed?"
            }
            TransparentPurchaseProcess => {
                "Is the purchase process clear and transparent to the buyer?"
            }
            ShowsFinalPrice => "Is the final total price shown before payment?",
            ShowsMerchantLocationAtCheckout => {
                "Is the Merchant Outlet Location shown at the final checkout step?"
            }
            HasTermsAgreementCheckbox => {
                "Is there a checkbox for agreeing to Terms & Conditions / Refund Policy before purchase?"
            }
            PaymentMethodsMentioned => {
                "List of payment methods mentioned (e.g. Visa, Mastercard, PayPal)"
            }
            HasReceiptInfo => {
                "Is there any evidence of electronic receipt generation (order confirmation page, email receipt mention)?"
            }
            HasMobileResponsive => {
                "Does the site appear to have responsive/mobile-friendly design (viewport meta tag, responsive CSS)?"
            }
        }
    }
}

/// Borrowed view of one attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Flag(bool),
    Text(Option<&'a str>),
    Days(Option<u32>),
    List(&'a [String]),
}

impl FieldValue<'_> {
    /// Whether the oracle reported evidence for this attribute
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Flag(flag) => *flag,
            FieldValue::Text(text) => text.map_or(false, |t| !is_absent(t)),
            FieldValue::Days(days) => days.is_some(),
            FieldValue::List(items) => items.iter().any(|item| !is_absent(item)),
        }
    }

    /// Human-readable rendering for the checklist
    pub fn display(&self) -> String {
        if !self.is_present() {
            return NOT_FOUND.to_string();
        }
        match self {
            FieldValue::Flag(_) => "Found".to_string(),
            FieldValue::Text(text) => text.unwrap_or(NOT_FOUND).trim().to_string(),
            FieldValue::Days(days) => match days {
                Some(1) => "1 day".to_string(),
                Some(n) => format!("{} days", n),
                None => NOT_FOUND.to_string(),
            },
            FieldValue::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !is_absent(item))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// JSON schema sent to the oracle for a static analysis
pub fn target_schema() -> Value {
    let mut properties = Map::new();
    for field in Field::ALL {
        let property = match field.kind() {
            FieldKind::Flag => json!({
                "type": "boolean",
                "default": false,
                "description": field.description(),
            }),
            FieldKind::Text => json!({
                "type": ["string", "null"],
                "default": null,
                "description": field.description(),
            }),
            FieldKind::Days => json!({
                "type": ["integer", "null"],
                "minimum": 0,
                "default": null,
                "description": field.description(),
            }),
            FieldKind::List => json!({
                "type": "array",
                "items": { "type": "string" },
                "default": [],
                "description": field.description(),
            }),
        };
        properties.insert(field.name().to_string(), property);
    }

    json!({
        "title": "SiteContentExtraction",
        "description": "Compliance-relevant data extracted from website text",
        "type": "object",
        "properties": Value::Object(properties),
    })
}
