// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Email content for the two notification messages.
//!
//! Fields arriving here have already been sanitized; interpolations
//! into the HTML bodies are additionally entity-escaped.

use crate::mailer::EmailMessage;
use crate::submission::{Submission, Urgency};
use chrono::Utc;

/// Escape text for interpolation into an HTML body.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Human-readable reference number: last 8 digits of the current Unix
/// millisecond timestamp.
pub fn reference_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let start = millis.len().saturating_sub(8);
    millis[start..].to_string()
}

/// Internal notification sent to the operator address.
///
/// Reply-to is set to the submitter so the operator can answer
/// directly; the subject carries urgency and organization.
pub fn operator_notification(submission: &Submission, admin_address: &str) -> EmailMessage {
    let urgency_label = submission.urgency.label();
    let service_label = submission.service.label();
    let org_label = submission.organization_type.label();
    let color = submission.urgency.banner_color();

    let subject = if submission.urgency == Urgency::Emergency {
        format!(
            "🚨 EMERGENCY - New Contact: {} - {}",
            submission.organization, service_label
        )
    } else {
        format!("New Contact: {} - {}", submission.organization, service_label)
    };

    let phone_row = submission
        .phone
        .as_deref()
        .map(|p| {
            format!(
                "<tr><td style=\"padding: 8px 0; color: #6b7280; font-weight: 600;\">Phone:</td>\
                 <td style=\"padding: 8px 0; color: #1f2937;\">{}</td></tr>",
                escape_html(p)
            )
        })
        .unwrap_or_default();

    let emergency_note = if submission.urgency == Urgency::Emergency {
        "<p style=\"color: #dc2626; font-weight: 600;\">⚠️ Emergency request - Immediate response required</p>"
    } else {
        ""
    };

    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>New Contact Form Submission</title></head>
<body style="margin: 0; padding: 0; background-color: #f8fafc; font-family: Arial, sans-serif;">
  <div style="max-width: 600px; margin: 0 auto; background-color: #ffffff;">
    <div style="background: linear-gradient(135deg, #0ea5e9, #06b6d4); padding: 30px 40px; text-align: center;">
      <h1 style="color: #ffffff; margin: 0; font-size: 24px;">New Contact Form Submission</h1>
      <p style="color: #ffffff; margin: 10px 0 0 0; opacity: 0.9;">Pure Water Solutions - Water Hygiene Services</p>
    </div>
    <div style="background-color: {color}; color: #ffffff; padding: 15px 40px; text-align: center;">
      <h2 style="margin: 0; font-size: 18px;">PRIORITY: {urgency}</h2>
    </div>
    <div style="padding: 40px;">
      <h3 style="color: #1f2937; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px;">Contact Information</h3>
      <table style="width: 100%; border-collapse: collapse;">
        <tr><td style="padding: 8px 0; color: #6b7280; font-weight: 600; width: 120px;">Name:</td>
            <td style="padding: 8px 0; color: #1f2937;">{name}</td></tr>
        <tr><td style="padding: 8px 0; color: #6b7280; font-weight: 600;">Email:</td>
            <td style="padding: 8px 0; color: #1f2937;">{email}</td></tr>
        {phone_row}
        <tr><td style="padding: 8px 0; color: #6b7280; font-weight: 600;">Organization:</td>
            <td style="padding: 8px 0; color: #1f2937;">{organization}</td></tr>
        <tr><td style="padding: 8px 0; color: #6b7280; font-weight: 600;">Type:</td>
            <td style="padding: 8px 0; color: #1f2937;">{org_type}</td></tr>
      </table>
      <h3 style="color: #1f2937; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px;">Service Request</h3>
      <table style="width: 100%; border-collapse: collapse;">
        <tr><td style="padding: 8px 0; color: #6b7280; font-weight: 600; width: 120px;">Service:</td>
            <td style="padding: 8px 0; color: #1f2937;">{service}</td></tr>
        <tr><td style="padding: 8px 0; color: #6b7280; font-weight: 600;">Urgency:</td>
            <td style="padding: 8px 0; color: {color}; font-weight: 600;">{urgency}</td></tr>
      </table>
      <h3 style="color: #1f2937; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px;">Project Details</h3>
      <div style="background-color: #f8fafc; padding: 20px; border-left: 4px solid #0ea5e9;">
        <p style="color: #1f2937; margin: 0; white-space: pre-wrap;">{message}</p>
      </div>
      <div style="background-color: #fef3c7; border: 1px solid #f59e0b; padding: 20px; text-align: center; margin-top: 30px;">
        <p style="color: #92400e; margin: 0;">Response time target: <strong>{urgency}</strong></p>
        {emergency_note}
      </div>
    </div>
    <div style="background-color: #f8fafc; padding: 20px 40px; text-align: center; border-top: 1px solid #e5e7eb;">
      <p style="color: #6b7280; margin: 0; font-size: 12px;">
        Pure Water Solutions Ltd | Professional Water Hygiene Services<br>
        This is an automated notification from your contact form.
      </p>
    </div>
  </div>
</body>
</html>"#,
        color = color,
        urgency = urgency_label,
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        phone_row = phone_row,
        organization = escape_html(&submission.organization),
        org_type = org_label,
        service = service_label,
        message = escape_html(&submission.message),
        emergency_note = emergency_note,
    );

    let phone_line = submission
        .phone
        .as_deref()
        .map(|p| format!("- Phone: {p}\n"))
        .unwrap_or_default();
    let emergency_line = if submission.urgency == Urgency::Emergency {
        "\nEMERGENCY REQUEST - Immediate response required"
    } else {
        ""
    };

    let text_body = format!(
        "NEW CONTACT FORM SUBMISSION - {urgency}\n\n\
         Contact Information:\n\
         - Name: {name}\n\
         - Email: {email}\n\
         {phone_line}\
         - Organization: {organization}\n\
         - Type: {org_type}\n\n\
         Service Request:\n\
         - Service: {service}\n\
         - Urgency: {urgency}\n\n\
         Project Details:\n{message}\n\n\
         Response time target: {urgency}{emergency_line}\n",
        urgency = urgency_label,
        name = submission.name,
        email = submission.email,
        phone_line = phone_line,
        organization = submission.organization,
        org_type = org_label,
        service = service_label,
        message = submission.message,
        emergency_line = emergency_line,
    );

    EmailMessage {
        to: vec![admin_address.to_string()],
        reply_to: Some(submission.email.clone()),
        subject,
        html_body,
        text_body,
    }
}

/// Acknowledgment sent to the submitter's own address.
pub fn submitter_acknowledgment(submission: &Submission) -> EmailMessage {
    let reference = reference_number();
    let service_label = submission.service.label();
    let urgency_label = submission.urgency.label();

    let emergency_block = if submission.urgency == Urgency::Emergency {
        r#"<div style="background-color: #fef2f2; border: 2px solid #dc2626; padding: 20px; margin: 25px 0; text-align: center;">
      <h4 style="color: #dc2626; margin: 0 0 10px 0;">🚨 Emergency Request Acknowledged</h4>
      <p style="color: #dc2626; margin: 0; font-weight: 600;">Your emergency request is being prioritized. You will receive a response within hours, not days.</p>
    </div>"#
    } else {
        ""
    };

    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Thank You for Your Enquiry</title></head>
<body style="margin: 0; padding: 0; background-color: #f8fafc; font-family: Arial, sans-serif;">
  <div style="max-width: 600px; margin: 0 auto; background-color: #ffffff;">
    <div style="background: linear-gradient(135deg, #0ea5e9, #06b6d4); padding: 40px; text-align: center;">
      <h1 style="color: #ffffff; margin: 0; font-size: 28px;">Thank You for Your Enquiry</h1>
      <p style="color: #ffffff; margin: 15px 0 0 0; opacity: 0.9;">Pure Water Solutions - Professional Water Hygiene Services</p>
    </div>
    <div style="padding: 40px;">
      <p style="color: #1f2937;">Dear {name},</p>
      <p style="color: #1f2937;">Thank you for contacting Pure Water Solutions regarding your water hygiene
      requirements for <strong>{organization}</strong>. We have received your enquiry and our specialist
      team will review your request shortly.</p>
      <div style="background-color: #f0f9ff; border: 1px solid #0ea5e9; padding: 20px; margin: 25px 0;">
        <h3 style="color: #0c4a6e; margin: 0 0 15px 0;">Your Enquiry Summary</h3>
        <table style="width: 100%; border-collapse: collapse;">
          <tr><td style="padding: 5px 0; color: #374151; font-weight: 600; width: 30%;">Service:</td>
              <td style="padding: 5px 0; color: #1f2937;">{service}</td></tr>
          <tr><td style="padding: 5px 0; color: #374151; font-weight: 600;">Priority:</td>
              <td style="padding: 5px 0; color: #1f2937;">{urgency}</td></tr>
          <tr><td style="padding: 5px 0; color: #374151; font-weight: 600;">Reference:</td>
              <td style="padding: 5px 0; color: #1f2937;">{reference}</td></tr>
        </table>
      </div>
      <h3 style="color: #1f2937;">What Happens Next?</h3>
      <ol style="color: #6b7280;">
        <li><strong>Initial Review</strong> - Our specialist team will review your requirements within the priority timeframe.</li>
        <li><strong>Expert Consultation</strong> - We'll contact you to discuss your specific needs and provide expert guidance.</li>
        <li><strong>Tailored Solution</strong> - Receive a comprehensive proposal tailored to your organization's requirements.</li>
      </ol>
      {emergency_block}
      <div style="background-color: #f8fafc; padding: 20px; margin: 25px 0;">
        <h3 style="color: #1f2937; margin: 0 0 15px 0;">Need Immediate Assistance?</h3>
        <p style="color: #1f2937; margin: 0;">
          Emergency Hotline: +44 20 7123 4567<br>
          Email: urgent@purewateruk.com
        </p>
      </div>
      <p style="color: #1f2937;">Best regards,<br><strong>The Pure Water Solutions Team</strong></p>
    </div>
    <div style="background-color: #0ea5e9; padding: 30px 40px; text-align: center;">
      <p style="color: #ffffff; margin: 0; font-size: 14px;">
        Pure Water Solutions Ltd | Professional Water Hygiene Services<br>
        HTM 04-01 Compliant • NHS Approved • UKAS Accredited<br>
        info@purewateruk.com | +44 20 7123 4567
      </p>
    </div>
  </div>
</body>
</html>"#,
        name = escape_html(&submission.name),
        organization = escape_html(&submission.organization),
        service = service_label,
        urgency = urgency_label,
        reference = reference,
        emergency_block = emergency_block,
    );

    let emergency_lines = if submission.urgency == Urgency::Emergency {
        "\nEMERGENCY REQUEST ACKNOWLEDGED\n\
         Your emergency request is being prioritized. You will receive a response within hours, not days.\n"
    } else {
        ""
    };

    let text_body = format!(
        "Dear {name},\n\n\
         Thank you for contacting Pure Water Solutions regarding your water hygiene requirements \
         for {organization}. We have received your enquiry and our specialist team will review \
         your request shortly.\n\n\
         Your Enquiry Summary:\n\
         - Service: {service}\n\
         - Priority: {urgency}\n\
         - Reference: {reference}\n\n\
         What Happens Next?\n\
         1. Initial Review - Our specialist team will review your requirements within the priority timeframe\n\
         2. Expert Consultation - We'll contact you to discuss your specific needs and provide expert guidance\n\
         3. Tailored Solution - Receive a comprehensive proposal tailored to your organization's requirements\n\
         {emergency_lines}\n\
         Need Immediate Assistance?\n\
         Emergency Hotline: +44 20 7123 4567\n\
         Email: urgent@purewateruk.com\n\n\
         Best regards,\n\
         The Pure Water Solutions Team\n",
        name = submission.name,
        organization = submission.organization,
        service = service_label,
        urgency = urgency_label,
        reference = reference,
        emergency_lines = emergency_lines,
    );

    EmailMessage {
        to: vec![submission.email.clone()],
        reply_to: None,
        subject: "Thank you for your water hygiene enquiry - Pure Water Solutions".to_string(),
        html_body,
        text_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{OrganizationType, ServiceKind, Urgency};

    fn submission(urgency: Urgency) -> Submission {
        Submission {
            name: "Jo Smith".to_string(),
            email: "jo@nhs.uk".to_string(),
            phone: Some("020 7946 0123".to_string()),
            organization: "City Hospital".to_string(),
            organization_type: OrganizationType::NhsTrust,
            service: ServiceKind::WaterTesting,
            urgency,
            message: "We need quarterly legionella sampling for our main building.".to_string(),
        }
    }

    #[test]
    fn test_operator_notification_addressing() {
        let msg = operator_notification(&submission(Urgency::Routine), "admin@purewateruk.com");
        assert_eq!(msg.to, vec!["admin@purewateruk.com".to_string()]);
        assert_eq!(msg.reply_to.as_deref(), Some("jo@nhs.uk"));
        assert_eq!(msg.subject, "New Contact: City Hospital - Water Quality Testing");
    }

    #[test]
    fn test_emergency_subject_tagged() {
        let msg = operator_notification(&submission(Urgency::Emergency), "admin@purewateruk.com");
        assert!(msg.subject.starts_with("🚨 EMERGENCY - "));
        assert!(msg.text_body.contains("EMERGENCY REQUEST - Immediate response required"));
    }

    #[test]
    fn test_operator_bodies_carry_labels() {
        let msg = operator_notification(&submission(Urgency::Urgent), "admin@purewateruk.com");
        for body in [&msg.html_body, &msg.text_body] {
            assert!(body.contains("Urgent (24-48 hours)"));
            assert!(body.contains("Water Quality Testing"));
            assert!(body.contains("NHS Trust"));
            assert!(body.contains("020 7946 0123"));
        }
    }

    #[test]
    fn test_acknowledgment_addressing() {
        let msg = submitter_acknowledgment(&submission(Urgency::Routine));
        assert_eq!(msg.to, vec!["jo@nhs.uk".to_string()]);
        assert!(msg.reply_to.is_none());
        assert_eq!(
            msg.subject,
            "Thank you for your water hygiene enquiry - Pure Water Solutions"
        );
        assert!(!msg.html_body.contains("Emergency Request Acknowledged"));
    }

    #[test]
    fn test_acknowledgment_emergency_notice() {
        let msg = submitter_acknowledgment(&submission(Urgency::Emergency));
        assert!(msg.html_body.contains("Emergency Request Acknowledged"));
        assert!(msg.text_body.contains("EMERGENCY REQUEST ACKNOWLEDGED"));
    }

    #[test]
    fn test_reference_number_shape() {
        let reference = reference_number();
        assert_eq!(reference.len(), 8);
        assert!(reference.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_html_interpolations_escaped() {
        let mut s = submission(Urgency::Routine);
        s.name = "Jo & Co \"Sampling\"".to_string();
        let msg = operator_notification(&s, "admin@purewateruk.com");
        assert!(msg.html_body.contains("Jo &amp; Co &quot;Sampling&quot;"));
    }
}
