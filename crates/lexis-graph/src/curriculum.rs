//! Built-in language curriculum.
//!
//! Used when the host does not supply its own graph definition.

use crate::error::Result;
use crate::graph::SkillGraph;
use crate::node::SkillNode;

/// The built-in node set, in declaration order.
pub fn default_nodes() -> Vec<SkillNode> {
    vec![
        SkillNode::new("alphabet", "Alphabet & Sounds", "basics", 1)
            .with_unlock("greetings")
            .with_unlock("numbers")
            .with_mastery_requirement(80)
            .with_estimated_time(15)
            .with_experience(50)
            .with_unlocked_feature("flashcards")
            .with_position(0.0, 0.0),
        SkillNode::new("pronunciation", "Pronunciation", "basics", 1)
            .with_unlock("present-tense")
            .with_mastery_requirement(80)
            .with_estimated_time(15)
            .with_experience(50)
            .with_position(2.0, 0.0),
        SkillNode::new("greetings", "Greetings", "vocabulary", 2)
            .with_prerequisite("alphabet")
            .with_unlock("family")
            .with_unlock("present-tense")
            .with_mastery_requirement(85)
            .with_estimated_time(20)
            .with_experience(100)
            .with_badge("first-words")
            .with_position(0.0, 1.0),
        SkillNode::new("numbers", "Numbers", "vocabulary", 2)
            .with_prerequisite("alphabet")
            .with_unlock("food")
            .with_mastery_requirement(85)
            .with_estimated_time(20)
            .with_experience(100)
            .with_position(1.0, 1.0),
        SkillNode::new("family", "Family", "vocabulary", 3)
            .with_prerequisite("greetings")
            .with_unlock("food")
            .with_mastery_requirement(85)
            .with_estimated_time(25)
            .with_experience(150)
            .with_position(0.0, 2.0),
        SkillNode::new("present-tense", "Present Tense", "grammar", 3)
            .with_prerequisite("greetings")
            .with_prerequisite("pronunciation")
            .with_unlock("past-tense")
            .with_mastery_requirement(90)
            .with_estimated_time(30)
            .with_experience(200)
            .with_unlocked_feature("card-collection")
            .with_position(2.0, 2.0),
        SkillNode::new("food", "Food & Drink", "vocabulary", 4)
            .with_prerequisite("family")
            .with_prerequisite("numbers")
            .with_unlock("conversation")
            .with_mastery_requirement(85)
            .with_estimated_time(25)
            .with_experience(150)
            .with_position(0.0, 3.0),
        SkillNode::new("past-tense", "Past Tense", "grammar", 4)
            .with_prerequisite("present-tense")
            .with_unlock("conversation")
            .with_mastery_requirement(90)
            .with_estimated_time(35)
            .with_experience(250)
            .with_badge("grammar-apprentice")
            .with_position(2.0, 3.0),
        SkillNode::new("conversation", "Everyday Conversation", "speaking", 5)
            .with_prerequisite("food")
            .with_prerequisite("past-tense")
            .with_unlock("essay-writing")
            .with_mastery_requirement(95)
            .with_estimated_time(40)
            .with_experience(300)
            .with_unlocked_feature("essay")
            .with_position(1.0, 4.0),
        SkillNode::new("essay-writing", "Essay Writing", "writing", 6)
            .with_prerequisite("conversation")
            .with_mastery_requirement(95)
            .with_estimated_time(45)
            .with_experience(400)
            .with_badge("wordsmith")
            .with_position(1.0, 5.0),
    ]
}

/// The built-in curriculum as a validated graph.
pub fn default_graph() -> Result<SkillGraph> {
    SkillGraph::new(default_nodes())
}
