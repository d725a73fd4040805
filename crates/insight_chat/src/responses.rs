//! Canned assistant replies.
//!
//! Both builders are deterministic: every call yields the same content and
//! recommendations, only the message id and timestamp are fresh.

use crate::types::{Message, Metric, MetricColor, Recommendation};

/// Greeting shown before the first user message
pub const GREETING: &str = "Veri analizi sistemine hoş geldiniz. Size nasıl yardımcı olabilirim?";

/// Content of the plain reply
pub const PLAIN_REPLY: &str = "Gözlemliyorum. Bu konuda derin bir analiz yapıyorum. Stratejik bakış açınıza göre, en verimli yol parametrelerin dengeli değerlendirilmesi yönünde ilerlemek olabilir.";

/// Summary line above the recommendation cards
pub const RECOMMENDATION_SUMMARY: &str = "Veri analizi tamamlandı. En yüksek uyumlu 3 sonuç bulundu.";

/// Banner shown once recommendations arrive
pub const ANALYSIS_COMPLETE_STATUS: &str = "Analiz başarıyla tamamlandı.";

/// Banner shown after settings are saved
pub const SETTINGS_SAVED_STATUS: &str = "Ayarlar kaydedildi.";

/// Produces the assistant side of the conversation.
#[cfg_attr(test, mockall::automock)]
pub trait ReplyProducer: Send + Sync {
    /// Reply for queries that matched an analysis keyword
    fn recommendation_reply(&self) -> Message;

    /// Reply for everything else
    fn plain_reply(&self) -> Message;
}

/// The fixed replies of the demo assistant
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedReplies;

impl ReplyProducer for CannedReplies {
    fn recommendation_reply(&self) -> Message {
        build_recommendation_reply()
    }

    fn plain_reply(&self) -> Message {
        build_plain_reply()
    }
}

/// Build the assistant message carrying the three canned recommendations.
pub fn build_recommendation_reply() -> Message {
    Message::recommendations(RECOMMENDATION_SUMMARY, canned_recommendations())
}

/// Build the fixed plain-text assistant reply.
pub fn build_plain_reply() -> Message {
    Message::assistant(PLAIN_REPLY)
}

/// The three literal recommendations, best score first.
pub fn canned_recommendations() -> Vec<Recommendation> {
    vec![
        recommendation(
            "rec-1",
            "Model Alpha - Optimize Edilmiş",
            "Sistem dayanıklılığı ve performans dengesi açısından öneriliyor.",
            94,
            [96, 92, 89],
            "Bu model; yüksek verimlilik, güçlü performans ve dengeli maliyet parametrelerini birleştiriyor. Analiz sonucunda, kullanım alışkanlıklarınıza %94 uyum sağladığı tespit edildi. Özellikle sistem dayanıklılığı ve uzun vadeli optimizasyon açısından öne çıkıyor.",
        ),
        recommendation(
            "rec-2",
            "Model Beta - Performans Odaklı",
            "Yüksek hız ve işlem gücü gerektiren kullanımlar için ideal.",
            87,
            [82, 98, 78],
            "Performans merkezli bu konfigürasyon, yoğun işlem gerektiren görevlerde maksimum verim sağlıyor. Maliyet açısından daha yüksek olsa da, zaman kritik operasyonlarda üstün performans sunuyor.",
        ),
        recommendation(
            "rec-3",
            "Model Gamma - Dengeli Çözüm",
            "Tüm parametrelerde dengeli bir yaklaşım sunar.",
            85,
            [88, 84, 92],
            "Bu seçenek; maliyet, verimlilik ve performans arasında optimal denge kuruyor. Genel kullanım senaryoları için güvenilir ve sürdürülebilir bir çözüm.",
        ),
    ]
}

// Metric values are [Verimlilik, Performans, Maliyet].
fn recommendation(
    id: &str,
    title: &str,
    description: &str,
    score: u8,
    values: [u8; 3],
    reasoning: &str,
) -> Recommendation {
    let [efficiency, performance, cost] = values;
    Recommendation {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        score,
        metrics: vec![
            Metric::new("Verimlilik", efficiency, MetricColor::Positive),
            Metric::new("Performans", performance, MetricColor::Accent),
            Metric::new("Maliyet", cost, MetricColor::Neutral),
        ],
        reasoning: reasoning.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MessageKind, MessageRole};

    #[test]
    fn test_recommendation_reply() {
        let msg = build_recommendation_reply();
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.kind, MessageKind::Recommendations);
        assert_eq!(msg.content, RECOMMENDATION_SUMMARY);

        let ids: Vec<_> = msg.recommendations.iter().map(|r| r.id.as_str()).collect();
        let scores: Vec<_> = msg.recommendations.iter().map(|r| r.score).collect();
        assert_eq!(ids, ["rec-1", "rec-2", "rec-3"]);
        assert_eq!(scores, [94, 87, 85]);
        assert!(msg.validate().is_ok());
    }

    #[test]
    fn test_recommendation_metrics() {
        let recs = canned_recommendations();
        let beta = &recs[1];
        let labels: Vec<_> = beta.metrics.iter().map(|m| m.label.as_str()).collect();
        let values: Vec<_> = beta.metrics.iter().map(|m| m.value).collect();
        assert_eq!(labels, ["Verimlilik", "Performans", "Maliyet"]);
        assert_eq!(values, [82, 98, 78]);
        assert_eq!(beta.metrics[1].color, MetricColor::Accent);
    }

    #[test]
    fn test_replies_are_deterministic() {
        let a = build_recommendation_reply();
        let b = build_recommendation_reply();
        assert_eq!(a.recommendations, b.recommendations);
        assert_ne!(a.id, b.id);

        let plain = CannedReplies.plain_reply();
        assert_eq!(plain.kind, MessageKind::Text);
        assert_eq!(plain.content, PLAIN_REPLY);
        assert!(plain.recommendations.is_empty());
    }
}
