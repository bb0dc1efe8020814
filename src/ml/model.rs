use burn::{
    module::Param,
    nn::{
        gru::{Gru, GruConfig},
        loss::BinaryCrossEntropyLossConfig,
        Dropout, DropoutConfig, Embedding, EmbeddingConfig, Linear, LinearConfig,
    },
    prelude::*,
    tensor::{activation, Distribution},
};

use crate::infra::embedding_store::EmbeddingMatrix;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct GruClassifierConfig {
    pub vocab_size: usize,
    pub embed_size: usize,
    pub hidden_size: usize,
    #[config(default = 0.4)]
    pub spatial_dropout: f64,
    #[config(default = 0.3)]
    pub input_dropout: f64,
    #[config(default = 6)]
    pub num_labels: usize,
}

impl GruClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GruClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embed_size).init(device);
        let spatial_dropout = SpatialDropoutConfig::new(self.spatial_dropout).init();
        let input_dropout = DropoutConfig::new(self.input_dropout).init();
        let gru_forward = GruConfig::new(self.embed_size, self.hidden_size, true).init(device);
        let gru_backward = GruConfig::new(self.embed_size, self.hidden_size, true).init(device);
        // avg pool + max pool, each over both GRU directions
        let output = LinearConfig::new(self.hidden_size * 4, self.num_labels).init(device);

        GruClassifier {
            embedding,
            spatial_dropout,
            input_dropout,
            gru_forward,
            gru_backward,
            output,
        }
    }

    /// Build the model with the embedding table initialised from
    /// the pretrained matrix instead of random weights. The layer
    /// stays trainable, so out-of-vocabulary rows (zeros) can
    /// still pick up meaning during training.
    pub fn init_with_embeddings<B: Backend>(
        &self,
        pretrained: &EmbeddingMatrix,
        device: &B::Device,
    ) -> GruClassifier<B> {
        let mut model = self.init(device);
        model.embedding.weight = Param::from_tensor(pretrained.to_tensor(device));
        model
    }
}

// ─── Spatial Dropout ──────────────────────────────────────────────────────────
// Zeroes whole embedding channels instead of individual values:
// one Bernoulli mask of shape [batch, 1, channels], broadcast
// over every timestep. Inert outside of autodiff training, like
// Burn's own Dropout.

#[derive(Config, Debug)]
pub struct SpatialDropoutConfig {
    pub prob: f64,
}

impl SpatialDropoutConfig {
    pub fn init(&self) -> SpatialDropout {
        SpatialDropout { prob: self.prob }
    }
}

#[derive(Module, Clone, Debug)]
pub struct SpatialDropout {
    pub prob: f64,
}

impl SpatialDropout {
    pub fn forward<B: Backend>(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        if self.prob == 0.0 || !B::ad_enabled() {
            return input;
        }
        let [batch, seq_len, channels] = input.dims();
        let prob_keep = 1.0 - self.prob;
        let mask = Tensor::<B, 3>::random(
            [batch, 1, channels],
            Distribution::Bernoulli(prob_keep),
            &input.device(),
        );
        input * mask.expand([batch, seq_len, channels]) * (1.0 / prob_keep)
    }
}

// ─── Classifier ───────────────────────────────────────────────────────────────

#[derive(Module, Debug)]
pub struct GruClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub spatial_dropout: SpatialDropout,
    pub input_dropout: Dropout,
    pub gru_forward: Gru<B>,
    pub gru_backward: Gru<B>,
    pub output: Linear<B>,
}

impl<B: Backend> GruClassifier<B> {
    /// input: [batch, maxlen] token indices → [batch, num_labels]
    /// independent probabilities in [0, 1].
    pub fn forward(&self, input: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let embedded = self.embedding.forward(input); // [batch, maxlen, embed]
        let embedded = self.spatial_dropout.forward(embedded);
        let embedded = self.input_dropout.forward(embedded);

        // Bidirectional GRU: one direction reads the sequence as-is,
        // the other reads it time-reversed. The reversed outputs are
        // flipped back so both state sequences align per token.
        let forward_states = self.gru_forward.forward(embedded.clone(), None);
        let backward_states = self
            .gru_backward
            .forward(embedded.flip([1]), None)
            .flip([1]);
        let states = Tensor::cat(vec![forward_states, backward_states], 2); // [batch, maxlen, 2*hidden]

        // Two pooling reductions over time, concatenated.
        let avg_pool = states.clone().mean_dim(1).squeeze::<2>(1); // [batch, 2*hidden]
        let max_pool = states.max_dim(1).squeeze::<2>(1); // [batch, 2*hidden]
        let pooled = Tensor::cat(vec![avg_pool, max_pool], 1); // [batch, 4*hidden]

        // Sigmoid, not softmax: the labels are not mutually exclusive.
        activation::sigmoid(self.output.forward(pooled))
    }

    /// Forward pass plus the averaged binary cross-entropy over
    /// all label flags in the batch.
    pub fn forward_loss(
        &self,
        inputs: Tensor<B, 2, Int>,
        targets: Tensor<B, 2, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let probs = self.forward(inputs);
        let bce = BinaryCrossEntropyLossConfig::new().init(&probs.device());
        let loss = bce.forward(
            probs.clone().flatten::<1>(0, 1),
            targets.flatten::<1>(0, 1),
        );
        (loss, probs)
    }
}
