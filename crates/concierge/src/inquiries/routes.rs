use super::domain::FormKind;
use super::validation::{
    RuleSet, CONTACT_RULES, CORPORATE_SERVICES_RULES, CUSTOM_JOURNEYS_RULES, TRIP_INQUIRY_RULES,
};

/// Webhook-backed inquiry endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryRoute {
    Contact,
    CorporateServices,
    CustomJourneys,
    TripInquiry,
    SendForm,
}

impl InquiryRoute {
    pub const ALL: [InquiryRoute; 5] = [
        InquiryRoute::Contact,
        InquiryRoute::CorporateServices,
        InquiryRoute::CustomJourneys,
        InquiryRoute::TripInquiry,
        InquiryRoute::SendForm,
    ];

    pub fn path(self) -> &'static str {
        match self {
            InquiryRoute::Contact => "/api/contact",
            InquiryRoute::CorporateServices => "/api/corporate-services",
            InquiryRoute::CustomJourneys => "/api/custom-journeys",
            InquiryRoute::TripInquiry => "/api/trip-inquiry",
            InquiryRoute::SendForm => "/api/send-form",
        }
    }

    /// `send-form` carries the high-volume lead forms and relies on browser-side checks.
    pub fn rules(self) -> Option<&'static RuleSet> {
        match self {
            InquiryRoute::Contact => Some(&CONTACT_RULES),
            InquiryRoute::CorporateServices => Some(&CORPORATE_SERVICES_RULES),
            InquiryRoute::CustomJourneys => Some(&CUSTOM_JOURNEYS_RULES),
            InquiryRoute::TripInquiry => Some(&TRIP_INQUIRY_RULES),
            InquiryRoute::SendForm => None,
        }
    }

    /// Form the route always submits as; `None` defers to the body's `form_id`.
    pub fn form(self) -> Option<FormKind> {
        match self {
            InquiryRoute::Contact => Some(FormKind::Contact),
            InquiryRoute::CorporateServices => Some(FormKind::Corporate),
            InquiryRoute::CustomJourneys => Some(FormKind::CustomJourneys),
            InquiryRoute::TripInquiry => Some(FormKind::TripInquiry),
            InquiryRoute::SendForm => None,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            InquiryRoute::Contact => "Contact form submitted successfully",
            InquiryRoute::CorporateServices => "Corporate services request submitted successfully",
            InquiryRoute::CustomJourneys => "Custom journey request submitted successfully",
            InquiryRoute::TripInquiry => "Trip inquiry submitted successfully",
            InquiryRoute::SendForm => "Form submitted successfully",
        }
    }
}
