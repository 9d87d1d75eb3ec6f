#![forbid(unsafe_code)]

use bridgegas_contracts::content::{
    AboutContent, ContentDocument, HeroContent, SectionShape, SolutionOffering, SolutionsContent,
    TeamContent, TeamMember,
};

use crate::StorageError;

pub fn default_hero() -> HeroContent {
    HeroContent {
        title: "BridgeGas".to_string(),
        tagline: "Bridging TradFi & Crypto Payment Solutions".to_string(),
    }
}

pub fn default_about() -> AboutContent {
    AboutContent {
        heading: "Who We Are".to_string(),
        description: "BridgeGas is a pioneering B2B crypto startup revolutionizing how traditional businesses interact with blockchain technology. We specialize in creating seamless bridges between conventional financial systems and the emerging cryptocurrency ecosystem.".to_string(),
        mission: "Our mission is to eliminate the complexity and risk barriers that prevent enterprises from adopting crypto payment solutions, enabling them to unlock new revenue streams and operational efficiencies.".to_string(),
        values: "Built on principles of trust, innovation, and enterprise-grade reliability, BridgeGas empowers businesses to navigate the future of finance with confidence and security.".to_string(),
    }
}

pub fn default_solutions() -> SolutionsContent {
    SolutionsContent {
        heading: "Our Solutions".to_string(),
        subheading: "Comprehensive crypto payment infrastructure designed for enterprise adoption and scalability".to_string(),
        payment: SolutionOffering {
            title: "Crypto Payment Gateway".to_string(),
            description: "Seamlessly integrate cryptocurrency payments into your existing infrastructure with our secure, enterprise-grade gateway solution.".to_string(),
            benefit: "Reduce transaction fees by up to 70% while expanding your customer base to the growing crypto economy.".to_string(),
        },
        bridging: SolutionOffering {
            title: "On-chain/Off-chain Bridging".to_string(),
            description: "Advanced bridging technology that connects traditional banking systems with blockchain networks for fluid value transfer.".to_string(),
            benefit: "Enable instant settlements and 24/7 operations while maintaining full compatibility with existing financial workflows.".to_string(),
        },
        compliance: SolutionOffering {
            title: "Enterprise-Grade Compliance".to_string(),
            description: "Comprehensive regulatory compliance suite including AML/KYC, audit trails, and real-time monitoring for institutional standards.".to_string(),
            benefit: "Meet regulatory requirements while accessing crypto markets with confidence and complete transparency.".to_string(),
        },
    }
}

pub fn default_team() -> TeamContent {
    TeamContent {
        heading: "Our Team".to_string(),
        subheading: "Led by experienced entrepreneurs and technical experts in fintech and blockchain technology".to_string(),
        kirill: TeamMember {
            name: "Kirill Shurakhtov".to_string(),
            role: "Founder & CEO".to_string(),
            bio: "Visionary leader with deep expertise in bridging traditional finance and blockchain technology for enterprise adoption.".to_string(),
        },
        footer_note: "Our team is growing\u{2014}your feedback and interest will help us build out the BridgeGas leadership.".to_string(),
    }
}

/// Default documents in seed order, each checked against its section shape.
pub fn default_section_documents() -> Result<Vec<(SectionShape, ContentDocument)>, StorageError> {
    let mut out = Vec::with_capacity(SectionShape::ALL.len());
    for shape in SectionShape::ALL {
        let built = match shape {
            SectionShape::Hero => ContentDocument::from_shape(&default_hero()),
            SectionShape::About => ContentDocument::from_shape(&default_about()),
            SectionShape::Solutions => ContentDocument::from_shape(&default_solutions()),
            SectionShape::Team => ContentDocument::from_shape(&default_team()),
        };
        let doc = built
            .and_then(|doc| shape.check(&doc).map(|()| doc))
            .map_err(|violation| StorageError::SeedFailed {
                section: shape.section_name(),
                violation,
            })?;
        out.push((shape, doc));
    }
    Ok(out)
}
