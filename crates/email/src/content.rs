//! Shared email content templates
//!
//! Canonical content generators for payment notification emails, used by
//! both production (SES) and mock email services.

use rust_decimal::Decimal;

/// Format a BRL amount the Brazilian way ("R$ 1234,50").
pub fn format_brl(amount: Decimal) -> String {
    format!("R$ {}", amount.round_dp(2)).replace('.', ",")
}

/// Generate plain-text body for a mimo-received email.
pub fn mimo_received_text(
    creator_name: &str,
    sender_name: &str,
    amount: Decimal,
    payment_url: &str,
) -> String {
    format!(
        "Hi {}!\n\n\
        {} just sent you a mimo of {}.\n\n\
        See the details here:\n\
        {}\n\n\
        Thanks,\n\
        The Mimo Team",
        creator_name,
        sender_name,
        format_brl(amount),
        payment_url
    )
}

/// Generate styled HTML body for a mimo-received email.
pub fn mimo_received_html(
    creator_name: &str,
    sender_name: &str,
    amount: Decimal,
    payment_url: &str,
) -> String {
    let amount_brl = format_brl(amount);
    format!(
        r#"
            <html>
            <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                    <h2 style="color: #e91e63;">You received a mimo!</h2>

                    <p>Hi {creator_name}!</p>

                    <p><strong>{sender_name}</strong> just sent you a mimo of <strong>{amount_brl}</strong>.</p>

                    <div style="text-align: center; margin: 30px 0;">
                        <a href="{payment_url}"
                           style="background-color: #e91e63; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block; font-weight: bold;">
                            See the details
                        </a>
                    </div>

                    <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">

                    <p style="color: #666; font-size: 12px;">
                        Thanks, The Mimo Team
                    </p>
                </div>
            </body>
            </html>
            "#,
        creator_name = creator_name,
        sender_name = sender_name,
        amount_brl = amount_brl,
        payment_url = payment_url
    )
}

/// Generate plain-text body for a service-purchased email.
pub fn service_purchased_text(
    creator_name: &str,
    buyer_name: &str,
    service_title: &str,
    amount: Decimal,
    payment_url: &str,
) -> String {
    format!(
        "Hi {}!\n\n\
        {} purchased your service '{}' for {}.\n\n\
        A conversation with them is now open — say hello!\n\n\
        See the details here:\n\
        {}\n\n\
        Thanks,\n\
        The Mimo Team",
        creator_name,
        buyer_name,
        service_title,
        format_brl(amount),
        payment_url
    )
}

/// Generate styled HTML body for a service-purchased email.
pub fn service_purchased_html(
    creator_name: &str,
    buyer_name: &str,
    service_title: &str,
    amount: Decimal,
    payment_url: &str,
) -> String {
    let amount_brl = format_brl(amount);
    format!(
        r#"
            <html>
            <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                    <h2 style="color: #e91e63;">New service purchase!</h2>

                    <p>Hi {creator_name}!</p>

                    <p><strong>{buyer_name}</strong> purchased your service '<strong>{service_title}</strong>' for <strong>{amount_brl}</strong>.</p>

                    <p>A conversation with them is now open — say hello!</p>

                    <div style="text-align: center; margin: 30px 0;">
                        <a href="{payment_url}"
                           style="background-color: #e91e63; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block; font-weight: bold;">
                            See the details
                        </a>
                    </div>

                    <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">

                    <p style="color: #666; font-size: 12px;">
                        Thanks, The Mimo Team
                    </p>
                </div>
            </body>
            </html>
            "#,
        creator_name = creator_name,
        buyer_name = buyer_name,
        service_title = service_title,
        amount_brl = amount_brl,
        payment_url = payment_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl_uses_comma_separator() {
        assert_eq!(format_brl(Decimal::new(2550, 2)), "R$ 25,50");
        assert_eq!(format_brl(Decimal::new(100, 2)), "R$ 1,00");
    }

    #[test]
    fn test_mimo_received_text_contains_all_fields() {
        let text = mimo_received_text(
            "Ana",
            "Bruno",
            Decimal::new(2500, 2),
            "https://example.com/payments/abc",
        );
        assert!(text.contains("Ana"));
        assert!(text.contains("Bruno"));
        assert!(text.contains("R$ 25,00"));
        assert!(text.contains("https://example.com/payments/abc"));
    }

    #[test]
    fn test_mimo_received_html_contains_all_fields() {
        let html = mimo_received_html(
            "Ana",
            "Bruno",
            Decimal::new(2500, 2),
            "https://example.com/payments/abc",
        );
        assert!(html.contains("Ana"));
        assert!(html.contains("Bruno"));
        assert!(html.contains("R$ 25,00"));
        assert!(html.contains("https://example.com/payments/abc"));
    }

    #[test]
    fn test_service_purchased_text_contains_all_fields() {
        let text = service_purchased_text(
            "Ana",
            "Bruno",
            "Custom video",
            Decimal::new(15000, 2),
            "https://example.com/payments/abc",
        );
        assert!(text.contains("Ana"));
        assert!(text.contains("Bruno"));
        assert!(text.contains("Custom video"));
        assert!(text.contains("R$ 150,00"));
        assert!(text.contains("conversation"));
    }

    #[test]
    fn test_service_purchased_html_contains_all_fields() {
        let html = service_purchased_html(
            "Ana",
            "Bruno",
            "Custom video",
            Decimal::new(15000, 2),
            "https://example.com/payments/abc",
        );
        assert!(html.contains("Ana"));
        assert!(html.contains("Custom video"));
        assert!(html.contains("R$ 150,00"));
    }
}
